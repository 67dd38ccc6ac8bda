use simple_di::config::ContainerConfig;
use simple_di::container::Container;
use simple_di::instance::InstancePtr;
use std::thread;
use tracing_subscriber::EnvFilter;

struct Config {
    url: String,
}

struct Connection {
    config: InstancePtr<Config>,
}

struct Repository {
    connection: InstancePtr<Connection>,
}

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // run with RUST_LOG=debug to see what the container does
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // SIMPLE_DI_TRACE_REGISTRATIONS=true turns on container events
    let config = ContainerConfig::from_environment().expect("error reading container config");
    let container = Container::with_config(config);

    // factories can resolve dependencies from the container they are called from - the order of
    // registration doesn't matter, as long as everything is registered before resolution
    container.register_with_container(
        |container| {
            InstancePtr::new(Repository {
                connection: container.require().expect("missing connection"),
            })
        },
        true,
    );
    container.register_with_container(
        |container| {
            InstancePtr::new(Connection {
                config: container.require().expect("missing config"),
            })
        },
        true,
    );
    container.register_instance(Config {
        url: "memory://".to_string(),
    });

    // singletons are created once, even when requested from many threads
    let handles = (0..4)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || container.resolve::<Repository>().unwrap())
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let repository = handle.join().unwrap();
        println!("connected to: {}", repository.connection.config.url);
    }
}
