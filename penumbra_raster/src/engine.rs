/// Process-wide rendering state
///
/// Holds the state that is shared across every framebuffer rather than
/// owned by one: the clear-color register read by `clear_framebuffer`, and
/// the logger used by the `engine_*` macros.
///
/// Each piece of state sits behind its own `RwLock`, so concurrent callers
/// never observe a torn value. Ordering between `set_clear_color` and
/// `clear_framebuffer` on different threads is still the caller's job.

use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;
use crate::framebuffer::{ClearColor, Framebuffer};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use crate::texture::TargetManager;

// ===== INTERNAL STATE =====

/// Clear color register, (0,0,0,0) until first set
static CLEAR_COLOR: OnceLock<RwLock<ClearColor>> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Arc<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static LOG_LEVEL: OnceLock<RwLock<LogSeverity>> = OnceLock::new();

const DEFAULT_LOG_LEVEL: LogSeverity = LogSeverity::Info;

fn clear_color_register() -> &'static RwLock<ClearColor> {
    CLEAR_COLOR.get_or_init(|| RwLock::new(ClearColor::TRANSPARENT))
}

fn logger() -> &'static RwLock<Arc<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Arc::new(DefaultLogger)))
}

fn log_level() -> &'static RwLock<LogSeverity> {
    LOG_LEVEL.get_or_init(|| RwLock::new(DEFAULT_LOG_LEVEL))
}

// The guarded values are plain data, so a panic while holding a lock
// cannot leave them half-written.
fn read<T: ?Sized>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T: ?Sized>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ===== PUBLIC API =====

/// Facade over process-wide state
///
/// # Example
///
/// ```no_run
/// use penumbra_raster::penumbra::Engine;
/// use penumbra_raster::penumbra::render::{AttachmentType, Framebuffer, TargetManager, TextureFormat};
///
/// let mut targets = TargetManager::new();
/// let shadow_map = targets.create_render_target(TextureFormat::DepthFloat, 1024, 1024)?;
///
/// let mut framebuffer = Framebuffer::new();
/// framebuffer.attach(AttachmentType::Depth, Some(shadow_map), &targets)?;
///
/// Engine::set_clear_color(0.0, 0.0, 0.0, 1.0);
/// Engine::clear_framebuffer(Some(&framebuffer), &mut targets);
/// # Ok::<(), penumbra_raster::penumbra::Error>(())
/// ```
pub struct Engine;

impl Engine {
    // ===== CLEAR COLOR API =====

    /// Set the color used to clear color attachments
    ///
    /// Each channel is clamped to [0,1]. Always succeeds.
    pub fn set_clear_color(red: f32, green: f32, blue: f32, alpha: f32) {
        *write(clear_color_register()) = ClearColor::new(red, green, blue, alpha);
    }

    /// Current value of the clear color register
    pub fn clear_color() -> ClearColor {
        *read(clear_color_register())
    }

    /// Restore the clear color register to (0,0,0,0)
    pub fn reset_clear_color() {
        *write(clear_color_register()) = ClearColor::TRANSPARENT;
    }

    /// Clear every attachment of `framebuffer` using the clear color register
    ///
    /// Color targets get the register's value, depth targets get 1.0.
    /// Does nothing when `framebuffer` is `None`.
    pub fn clear_framebuffer(framebuffer: Option<&Framebuffer>, targets: &mut TargetManager) {
        if let Some(framebuffer) = framebuffer {
            framebuffer.clear(targets, Self::clear_color());
        }
    }

    // ===== LOGGING API =====

    /// Replace the logger
    ///
    /// # Example
    ///
    /// ```no_run
    /// use penumbra_raster::penumbra::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct Silent;
    /// impl Logger for Silent {
    ///     fn log(&self, _entry: &LogEntry) {}
    /// }
    ///
    /// Engine::set_logger(Silent);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        *write(self::logger()) = Arc::new(logger);
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        *write(logger()) = Arc::new(DefaultLogger);
    }

    /// Drop entries less severe than `level`
    pub fn set_log_level(level: LogSeverity) {
        *write(log_level()) = level;
    }

    pub fn log_level() -> LogSeverity {
        *read(log_level())
    }

    /// Logging entry point used by the engine_* macros
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Logging entry point with file:line, used by engine_error!
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if severity < Self::log_level() {
            return;
        }
        // Guard dropped before calling out; loggers may call set_logger.
        let logger = Arc::clone(&*read(logger()));
        logger.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file,
            line,
        });
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
