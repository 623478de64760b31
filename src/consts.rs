//! Project-wide constants.
//!
//! The status labels and the `phi` score are fixed values reported as-is;
//! nothing computes them.

use std::time::Duration;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Default listen port when none (or an unparsable one) is given.
pub const DEFAULT_PORT: u16 = 3000;

/// Interpreter binary looked up on `PATH`.
pub const DEFAULT_INTERPRETER: &str = "julia";

/// Script run when a simulation request names none.
pub const DEFAULT_SCRIPT: &str = "genesis_run.jl";

/// Directory, relative to the working directory, holding the scripts.
pub const SCRIPTS_DIR_NAME: &str = "scripts";

/// Wall-clock limit for a single script run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Captured output beyond this many bytes is truncated.
pub const MAX_OUTPUT_BYTES: usize = 1024 * 1024;

pub const SYSTEM_NAME: &str = "CBM-Q: Living AI Quantum Holographic Crystals";
pub const SYSTEM_VERSION: &str = "5.0-GODMODE";
pub const CORE_LABEL: &str = "7D Hyperbolic Neural Core";
pub const OWNER_LABEL: &str = "Sir Charles Spikes (BASEDGOD)";

/// Score reported by `/status` and `/chat`.
pub const PHI: f64 = 0.64;

/// Canned reply of the chat stub.
pub const CHAT_PLACEHOLDER_REPLY: &str = "Abrasax AGI response (integrate with CBMQChatbot module)";
