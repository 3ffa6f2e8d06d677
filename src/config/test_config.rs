use super::{Api, Counter, Hang, Logs, Mode, ServerBox, Settings};
use std::time::Duration;

/// Creates a new test configuration: ephemeral loopback port and a short hang.
pub fn new_test_config() -> Settings {
    Settings {
        server: ServerBox {
            env: super::TEST.to_string(),
            mode: Mode::FailureInjection,
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            api: Api {
                name: "hang-webserver:test".to_string(),
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            hang: Hang {
                duration: Duration::from_millis(300),
            },
            counter: Counter::default(),
        },
    }
}
