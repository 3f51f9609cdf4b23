pub mod commands;

use apbinder::{BusKind, ServiceOptions};
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;

use crate::commands::{configure, interface_name, serve, start, stations, stop};

#[derive(Parser, Debug)]
#[command(name = "apctl")]
#[command(version, about = "Control a software access point over D-Bus")]
struct Args {
    /// Use the session bus instead of the system bus
    #[arg(long, global = true)]
    session: bool,

    /// Connect to the bus daemon at this D-Bus address
    #[arg(long, global = true, conflicts_with = "session")]
    address: Option<String>,

    /// Well-known name of the service
    #[arg(long, global = true)]
    bus_name: Option<String>,

    /// Object path of the access point interface
    #[arg(long, global = true)]
    object_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Host the service, backed by an in-memory interface
    Serve {
        /// Interface name reported to clients
        #[arg(long, default_value = "wlan0")]
        interface: String,
        /// Change the associated station count every SECONDS while the
        /// daemon runs. Without it the count stays at 0.
        #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
        simulate_stations: Option<u64>,
    },
    /// Start the daemon and print station counts until interrupted
    Start,
    /// Stop the daemon
    Stop,
    /// Write the access point configuration
    Configure {
        #[arg(long)]
        ssid: String,
        /// Hide the SSID from beacons
        #[arg(long)]
        hidden: bool,
        #[arg(long, value_enum, default_value_t = BandArg::Any)]
        band: BandArg,
        #[arg(long, value_enum, default_value_t = EncryptionArg::Wpa2)]
        encryption: EncryptionArg,
        #[arg(long, default_value = "")]
        passphrase: String,
    },
    /// Print the network interface name
    Name,
    /// Print the number of associated stations
    Stations,
}

/// Band names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BandArg {
    #[value(name = "2g")]
    Band2G,
    #[value(name = "5g")]
    Band5G,
    Any,
}

/// Encryption names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncryptionArg {
    Open,
    Wpa,
    Wpa2,
}

impl From<BandArg> for apbinder::Band {
    fn from(value: BandArg) -> Self {
        match value {
            BandArg::Band2G => Self::Band2G,
            BandArg::Band5G => Self::Band5G,
            BandArg::Any => Self::Any,
        }
    }
}

impl From<EncryptionArg> for apbinder::EncryptionType {
    fn from(value: EncryptionArg) -> Self {
        match value {
            EncryptionArg::Open => Self::Open,
            EncryptionArg::Wpa => Self::Wpa,
            EncryptionArg::Wpa2 => Self::Wpa2,
        }
    }
}

impl Args {
    fn service_options(&self) -> ServiceOptions {
        let mut options = ServiceOptions::default();
        if self.session {
            options = options.with_bus(BusKind::Session);
        }
        if let Some(address) = &self.address {
            options = options.with_bus(BusKind::Address(address.clone()));
        }
        if let Some(name) = &self.bus_name {
            options = options.with_bus_name(name.clone());
        }
        if let Some(path) = &self.object_path {
            options = options.with_object_path(path.clone());
        }
        options
    }
}

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let options = args.service_options();

    match args.command {
        Command::Serve {
            interface,
            simulate_stations,
        } => serve(&options, interface, simulate_stations.map(Duration::from_secs)).await,
        Command::Start => start(&options).await,
        Command::Stop => stop(&options).await,
        Command::Configure {
            ssid,
            hidden,
            band,
            encryption,
            passphrase,
        } => {
            let config = apbinder::ApConfig::new(ssid, band.into(), encryption.into())
                .with_hidden(hidden)
                .with_passphrase(passphrase);
            configure(&options, &config).await
        }
        Command::Name => interface_name(&options).await,
        Command::Stations => stations(&options).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_configure() {
        let args = Args::try_parse_from([
            "apctl",
            "configure",
            "--ssid",
            "HomeAP",
            "--band",
            "5g",
            "--encryption",
            "wpa",
            "--passphrase",
            "12345678",
        ])
        .unwrap();

        match args.command {
            Command::Configure {
                ssid,
                hidden,
                band,
                encryption,
                passphrase,
            } => {
                assert_eq!(ssid, "HomeAP");
                assert!(!hidden);
                assert_eq!(band, BandArg::Band5G);
                assert_eq!(encryption, EncryptionArg::Wpa);
                assert_eq!(passphrase, "12345678");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_band() {
        assert!(Args::try_parse_from(["apctl", "configure", "--ssid", "x", "--band", "6g"]).is_err());
    }

    #[test]
    fn global_options_map_to_service_options() {
        let args = Args::try_parse_from([
            "apctl",
            "stations",
            "--session",
            "--bus-name",
            "org.example.Ap",
            "--object-path",
            "/org/example/Ap",
        ])
        .unwrap();

        let options = args.service_options();
        assert_eq!(options.bus, BusKind::Session);
        assert_eq!(options.bus_name, "org.example.Ap");
        assert_eq!(options.object_path, "/org/example/Ap");
    }

    #[test]
    fn defaults_to_system_bus() {
        let args = Args::try_parse_from(["apctl", "name"]).unwrap();
        assert_eq!(args.service_options(), ServiceOptions::default());
    }

    #[test]
    fn arg_enums_map_to_wire_types() {
        assert_eq!(apbinder::Band::from(BandArg::Band2G), apbinder::Band::Band2G);
        assert_eq!(
            apbinder::EncryptionType::from(EncryptionArg::Open),
            apbinder::EncryptionType::Open
        );
    }

    #[test]
    fn address_selects_explicit_bus() {
        let args = Args::try_parse_from([
            "apctl",
            "--address",
            "unix:path=/run/ap/bus",
            "stop",
        ])
        .unwrap();
        assert_eq!(
            args.service_options().bus,
            BusKind::Address("unix:path=/run/ap/bus".into())
        );
    }

    #[test]
    fn address_conflicts_with_session() {
        assert!(Args::try_parse_from([
            "apctl",
            "--session",
            "--address",
            "unix:path=/run/ap/bus",
            "stop",
        ])
        .is_err());
    }

    #[test]
    fn parses_serve_simulation_period() {
        let args =
            Args::try_parse_from(["apctl", "serve", "--interface", "wlan1", "--simulate-stations", "5"])
                .unwrap();
        match args.command {
            Command::Serve {
                interface,
                simulate_stations,
            } => {
                assert_eq!(interface, "wlan1");
                assert_eq!(simulate_stations, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_simulation_period() {
        assert!(Args::try_parse_from(["apctl", "serve", "--simulate-stations", "0"]).is_err());
    }

    #[test]
    fn serve_without_simulation() {
        let args = Args::try_parse_from(["apctl", "serve"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Serve {
                simulate_stations: None,
                ..
            }
        ));
    }
}
