//! Controller translation engine
//!
//! Ties the registry, the report codecs and the LED domains together behind
//! one tick-driven [`Engine`].
//!
//! ```
//! use padrelay_engine::{DeviceEvent, Engine, EngineConfig, MemoryLedWriter, MemoryTransport, Phase};
//! use padrelay_device_types::{AddressSlot, ConsoleType};
//! use padrelay_leds::bare_board;
//!
//! let config = EngineConfig::for_host(ConsoleType::Ps3);
//! let mut engine = Engine::init(config, MemoryTransport::new(), bare_board(), MemoryLedWriter::new())?;
//! engine.push_event(DeviceEvent::ps3_connected(1, 0x054C, 0x0268))?;
//! engine.tick();
//! engine.tick();
//!
//! let conn = engine.connection(AddressSlot::usb(1, 0)).expect("attached");
//! assert_eq!(conn.console_type(), ConsoleType::Ps3);
//! assert_eq!(conn.phase(), Phase::Active);
//! # Ok::<(), padrelay_engine::EngineError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod events;
pub mod feedback;
pub mod memory;
pub mod ports;

pub use config::{EngineConfig, FeedbackBinding, FeedbackSource, MAX_BINDINGS, MAX_REPORTS_PER_TICK};
pub use connection::{AuthSession, Connection, ConnectionInfo, Phase, needs_authentication};
pub use engine::{Engine, MAX_CONNECTIONS, TickSummary};
pub use error::{ConfigError, EngineError, EngineResult, ErrorSeverity};
pub use events::{DeviceEvent, EVENT_QUEUE_LEN};
pub use memory::{LedWrite, MemoryLedWriter, MemoryTransport};
pub use padrelay_leds::TransportError;
pub use ports::{
    INGEST_QUEUE_LEN, InboundReport, IngestConsumer, IngestProducer, IngestQueue, ReportSource,
    Transport,
};
