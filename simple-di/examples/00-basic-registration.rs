use simple_di::container::Container;
use simple_di::instance::InstancePtr;

// this is a capability we would like to resolve, without knowing the implementation
trait Greeter {
    fn greet(&self) -> String;
}

struct EnglishGreeter;

impl Greeter for EnglishGreeter {
    fn greet(&self) -> String {
        "Hello world!".to_string()
    }
}

#[cfg(feature = "threadsafe")]
type GreeterObject = dyn Greeter + Send + Sync;
#[cfg(not(feature = "threadsafe"))]
type GreeterObject = dyn Greeter;

// note: for the sake of simplicity, missing instances are unwrapped, rather than gracefully handled
fn main() {
    let container = Container::new();

    // fixed instances are returned as-is
    container.register_instance(42);

    // factories are called lazily - this one replaces the fixed instance above
    container.register(|| InstancePtr::new(43));
    assert_eq!(*container.resolve::<i32>().unwrap(), 43);

    // the concrete type is hidden behind the trait - only the trait object can be resolved
    container.register(|| InstancePtr::new(EnglishGreeter) as InstancePtr<GreeterObject>);
    assert!(container.resolve::<EnglishGreeter>().is_none());

    // prints "Hello world!"
    println!("{}", container.resolve::<GreeterObject>().unwrap().greet());

    // transient factories create a new instance on every resolution
    container.register_transient(|| InstancePtr::new(String::from("transient")));
    let first = container.resolve::<String>().unwrap();
    let second = container.resolve::<String>().unwrap();
    assert!(!InstancePtr::ptr_eq(&first, &second));

    // lists all registered types
    println!("{container:?}");
}
