//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                   |
//! |----------------|--------------------|-------------------------------|
//! | `hardware`     | SensorPort         | touch pins, ranger, colour eye|
//! |                | ActuatorPort       | drive PWM, horn GPIO          |
//! | `sim`          | SensorPort         | virtual track (host only)     |
//! |                | ActuatorPort       |                               |
//! | `log_sink`     | EventSink          | `log` facade                  |
//! | `config_store` | ConfigPort         | JSON file / postcard blob     |
//! | `time`         | ClockPort          | OS monotonic / manual clock   |

pub mod config_store;
pub mod hardware;
pub mod log_sink;
pub mod sim;
pub mod time;
