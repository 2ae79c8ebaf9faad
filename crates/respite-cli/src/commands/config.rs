use clap::Subcommand;
use respite_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the configured durations
    Show,
    /// Set the work duration
    SetWork { minutes: u64, seconds: u64 },
    /// Set the break duration
    SetBreak { minutes: u64, seconds: u64 },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let cfg = Config::load_or_default();
            println!(
                "work:  {:02}:{:02}",
                cfg.timer.work_minutes, cfg.timer.work_seconds
            );
            println!(
                "break: {:02}:{:02}",
                cfg.timer.break_minutes, cfg.timer.break_seconds
            );
        }
        ConfigAction::SetWork { minutes, seconds } => {
            let mut cfg = Config::load()?;
            cfg.set_work_duration(minutes.saturating_mul(60).saturating_add(seconds));
            cfg.save()?;
            println!(
                "work duration set to {:02}:{:02}",
                cfg.timer.work_minutes, cfg.timer.work_seconds
            );
        }
        ConfigAction::SetBreak { minutes, seconds } => {
            let mut cfg = Config::load()?;
            cfg.set_break_duration(minutes.saturating_mul(60).saturating_add(seconds));
            cfg.save()?;
            println!(
                "break duration set to {:02}:{:02}",
                cfg.timer.break_minutes, cfg.timer.break_seconds
            );
        }
    }
    Ok(())
}
