use crate::config::LoggingConfig;
use anyhow::Context;
use std::path::Path;

/// Send log messages to a file, since the terminal is taken over by the game.
///
/// `override_path` takes precedence over the path in `cfg`.  If no path can
/// be determined at all, logging stays disabled.
pub(crate) fn init(cfg: &LoggingConfig, override_path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = override_path.map(Into::into).or_else(|| cfg.log_file()) else {
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&*path)
        .context("failed to open log file")?;
    simplelog::WriteLogger::init(cfg.log_level, simplelog::Config::default(), file)
        .context("failed to install logger")?;
    Ok(())
}
