use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

pub fn tracing_init() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_max_level(Level::DEBUG)
        .with_timer(WallClock)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Local wall clock, seconds precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl FormatTime for WallClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S"))
    }
}
