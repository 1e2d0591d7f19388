use clap::{builder::TypedValueParser, Parser};
use sensor_bridge_protocol::DEFAULT_FRAME_WIDTH;
use std::{net::SocketAddr, time::Duration};

/// HTTP API for a BMP280 sensor attached to a microcontroller over serial.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Config {
    /// Serial port
    #[arg(short, long, default_value = "/dev/ttyACM0")]
    pub port: String,

    /// Serial baud rate
    #[arg(short, long, default_value_t = 115_200)]
    pub baud: u32,

    /// Time to wait for a reply from the device, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub timeout: u64,

    /// Width of the command frames sent to the device, in bytes
    #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH, value_parser = clap::value_parser!(u16).range(1..=64).map(usize::from))]
    pub frame_width: usize,

    /// Address to serve the HTTP API on
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    pub listen: SocketAddr,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["sensor-bridge-server"]).unwrap();
        assert_eq!(config.port, "/dev/ttyACM0");
        assert_eq!(config.baud, 115_200);
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.frame_width, 8);
        assert_eq!(config.listen, "127.0.0.1:5000".parse().unwrap());
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "sensor-bridge-server",
            "--port",
            "/dev/ttyAMA0",
            "--timeout",
            "250",
            "--frame-width",
            "10",
            "--listen",
            "0.0.0.0:8080",
        ])
        .unwrap();
        assert_eq!(config.port, "/dev/ttyAMA0");
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.frame_width, 10);
        assert_eq!(config.listen.port(), 8080);
    }

    #[test]
    fn frame_width_must_be_positive() {
        assert!(Config::try_parse_from(["sensor-bridge-server", "--frame-width", "0"]).is_err());
    }
}
