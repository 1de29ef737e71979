mod chart;

use std::io;

use crossterm::tty::IsTty;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use flush_odds_core::{Simulation, SimulationConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 日志写到 stderr，stdout 只留给结果和图表
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut simulation = Simulation::new(SimulationConfig::default());
    info!(
        "开始模拟：最多 {} 次，阈值 {}%",
        simulation.config().max_trials,
        simulation.config().stop_threshold
    );
    let report = simulation.run();

    let counts = &report.categories;
    info!(
        flush = counts.flush,
        pair = counts.pair,
        two_pair = counts.two_pair,
        three_of_a_kind = counts.three_of_a_kind,
        four_of_a_kind = counts.four_of_a_kind,
        full_house = counts.full_house,
        "牌型统计"
    );
    let json = serde_json::to_string(&report)?;
    debug!("模拟结果: {}", json);

    println!("{}", report.summary());

    if io::stdout().is_tty() {
        chart::show(&report)?;
    } else {
        info!("标准输出不是终端，跳过绘图");
    }

    Ok(())
}
