mod container_test {
    use simple_di::container::Container;
    use simple_di::instance::InstancePtr;
    use simple_di::ContainerError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    trait TestTrait {}

    struct TestType;

    impl TestTrait for TestType {}

    #[cfg(feature = "threadsafe")]
    type TestTraitObject = dyn TestTrait + Send + Sync;
    #[cfg(not(feature = "threadsafe"))]
    type TestTraitObject = dyn TestTrait;

    #[derive(Debug)]
    struct SomeObject;

    struct StringContainer {
        value: InstancePtr<String>,
    }

    struct Fruit {
        name: InstancePtr<StringContainer>,
    }

    struct Basket {
        fruit: InstancePtr<Fruit>,
        number: i32,
    }

    #[test]
    fn should_register_instances() {
        let container = Container::new();
        let object = InstancePtr::new(SomeObject);

        container.register_instance(42);
        container.register_instance("hello".to_string());
        container.register_shared(object.clone());
        container.register_instance(vec![1, 2, 3]);

        assert_eq!(*container.resolve::<String>().unwrap(), "hello");
        assert_eq!(*container.resolve::<i32>().unwrap(), 42);
        assert_eq!(*container.resolve::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
        assert!(InstancePtr::ptr_eq(
            &object,
            &container.resolve::<SomeObject>().unwrap()
        ));
    }

    #[test]
    fn should_register_factories() {
        let container = Container::new();
        let object = InstancePtr::new(SomeObject);
        let factory_object = object.clone();

        container.register(|| InstancePtr::new(42));
        container.register(|| InstancePtr::new("hello".to_string()));
        container.register(move || factory_object.clone());
        container.register(|| InstancePtr::new(vec![1, 2, 3]));

        assert_eq!(*container.resolve::<String>().unwrap(), "hello");
        assert_eq!(*container.resolve::<i32>().unwrap(), 42);
        assert_eq!(*container.resolve::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
        assert!(InstancePtr::ptr_eq(
            &object,
            &container.resolve::<SomeObject>().unwrap()
        ));
    }

    #[test]
    fn should_use_last_registration() {
        let container = Container::new();

        container.register_instance(22);
        container.register(|| InstancePtr::new(32));
        container.register_instance(42);

        assert_eq!(*container.resolve::<i32>().unwrap(), 42);

        container.register_transient(|| InstancePtr::new(52));

        assert_eq!(*container.resolve::<i32>().unwrap(), 52);
    }

    #[test]
    fn should_resolve_trait_objects_only() {
        let container = Container::new();

        container.register(|| InstancePtr::new(TestType) as InstancePtr<TestTraitObject>);

        assert!(container.resolve::<TestTraitObject>().is_some());
        assert!(container.resolve::<TestType>().is_none());
    }

    #[test]
    fn should_register_same_instance_as_trait_and_concrete_type() {
        let container = Container::new();
        let concrete = InstancePtr::new(TestType);

        container.register_shared(concrete.clone() as InstancePtr<TestTraitObject>);
        container.register_shared(concrete.clone());

        let trait_object = container.resolve::<TestTraitObject>().unwrap();
        let concrete_object = container.resolve::<TestType>().unwrap();

        assert!(InstancePtr::ptr_eq(&concrete, &concrete_object));
        assert!(std::ptr::eq(
            InstancePtr::as_ptr(&trait_object) as *const u8,
            InstancePtr::as_ptr(&concrete_object) as *const u8
        ));
    }

    #[test]
    fn should_call_factory_lazily() {
        for singleton in [true, false] {
            let container = Container::new();
            let call_count = Arc::new(AtomicUsize::new(0));
            let factory_call_count = call_count.clone();

            container.register_lazy(
                move || {
                    factory_call_count.fetch_add(1, Ordering::SeqCst);
                    InstancePtr::new("hello".to_string())
                },
                singleton,
            );

            assert_eq!(call_count.load(Ordering::SeqCst), 0);
            assert_eq!(*container.resolve::<String>().unwrap(), "hello");
            assert_eq!(call_count.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn should_register_singletons_by_default() {
        let container = Container::new();
        let call_count = Arc::new(AtomicUsize::new(0));
        let factory_call_count = call_count.clone();

        container.register(move || {
            factory_call_count.fetch_add(1, Ordering::SeqCst);
            InstancePtr::new(SomeObject)
        });

        let first = container.resolve::<SomeObject>().unwrap();
        let second = container.resolve::<SomeObject>().unwrap();

        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(InstancePtr::ptr_eq(&first, &second));
    }

    #[test]
    fn should_register_transient_factories() {
        let container = Container::new();
        let call_count = Arc::new(AtomicUsize::new(0));
        let factory_call_count = call_count.clone();

        container.register_lazy(
            move || {
                factory_call_count.fetch_add(1, Ordering::SeqCst);
                InstancePtr::new(SomeObject)
            },
            false,
        );

        let first = container.resolve::<SomeObject>().unwrap();
        let second = container.resolve::<SomeObject>().unwrap();

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
        assert!(!InstancePtr::ptr_eq(&first, &second));
    }

    #[test]
    fn should_return_none_for_unregistered_types() {
        let container = Container::new();

        assert!(container.resolve::<SomeObject>().is_none());
    }

    #[test]
    fn should_return_error_for_required_unregistered_types() {
        let container = Container::new();

        let error = container.require::<SomeObject>().unwrap_err();

        assert!(matches!(
            error,
            ContainerError::Unresolved { type_name } if type_name.contains("SomeObject")
        ));
        assert!(error.to_string().starts_with("Cannot resolve an instance of type:"));
    }

    #[test]
    fn should_resolve_dependency_graph() {
        let container = Container::new();

        container.register_with_container(
            |container| {
                InstancePtr::new(Fruit {
                    name: container.resolve().unwrap(),
                })
            },
            true,
        );
        container.register_with_container(
            |container| {
                InstancePtr::new(StringContainer {
                    value: container.resolve().unwrap(),
                })
            },
            true,
        );
        container.register_with_container(
            |container| {
                InstancePtr::new(Basket {
                    fruit: container.resolve().unwrap(),
                    number: *container.resolve::<i32>().unwrap(),
                })
            },
            true,
        );
        container.register_instance("Banana".to_string());
        container.register(|| InstancePtr::new(12));

        let basket = container.resolve::<Basket>().unwrap();

        assert_eq!(basket.number, 12);
        assert_eq!(*basket.fruit.name.value, "Banana");
    }

    #[test]
    fn should_resolve_dependencies_through_captured_container() {
        let container = Container::new();
        let factory_container = container.clone();

        container.register(move || {
            InstancePtr::new(StringContainer {
                value: factory_container.resolve().unwrap(),
            })
        });
        container.register_instance("Banana".to_string());

        assert_eq!(
            *container.resolve::<StringContainer>().unwrap().value,
            "Banana"
        );
    }

    #[test]
    #[should_panic]
    fn should_fail_on_unwrapped_missing_dependency() {
        let container = Container::new();

        container.register_with_container(
            |container| {
                InstancePtr::new(StringContainer {
                    value: container.resolve().unwrap(),
                })
            },
            true,
        );

        container.resolve::<StringContainer>();
    }

    #[test]
    fn should_describe_registrations() {
        let container = Container::new();
        container.register(|| InstancePtr::new("Banana".to_string()));
        container.register_instance(42);

        let description = format!("{container:?}");

        assert!(description.contains("i32"));
        assert!(description.contains("String"));
        assert!(container.is_registered::<String>());
        assert!(container.is_registered::<i32>());
    }
}

#[cfg(feature = "threadsafe")]
mod threadsafe_test {
    use simple_di::container::Container;
    use simple_di::instance::InstancePtr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    struct SlowService;

    #[test]
    fn should_create_singleton_once_under_contention() {
        const THREADS: usize = 8;

        let container = Container::new();
        let call_count = Arc::new(AtomicUsize::new(0));
        let factory_call_count = call_count.clone();

        container.register(move || {
            factory_call_count.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            InstancePtr::new(SlowService)
        });

        let barrier = Arc::new(Barrier::new(THREADS));
        let instances = (0..THREADS)
            .map(|_| {
                let container = container.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    container.resolve::<SlowService>().unwrap()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(instances
            .iter()
            .all(|instance| InstancePtr::ptr_eq(instance, &instances[0])));
    }

    #[test]
    fn should_register_from_other_threads() {
        let container = Container::new();

        let registering_container = container.clone();
        thread::spawn(move || registering_container.register_instance(42))
            .join()
            .unwrap();

        assert_eq!(*container.resolve::<i32>().unwrap(), 42);
    }
}
