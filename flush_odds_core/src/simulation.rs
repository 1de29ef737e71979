use crate::card::Deck;
use crate::hand::Hand;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, trace};

/// 默认的最大试验次数
pub const DEFAULT_MAX_TRIALS: u32 = 20_000;
/// 默认的停止阈值（百分比）
pub const DEFAULT_STOP_THRESHOLD: f64 = 99.9;

// 每隔多少次试验打印一次进度
const PROGRESS_INTERVAL: u32 = 1_000;

/// 模拟参数
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// 试验次数上限，达到后无论如何都会停止
    pub max_trials: u32,
    /// 运行中的同花概率（百分比）达到该值时提前停止
    pub stop_threshold: f64,
    /// 固定种子，用于复现结果；`None` 时从线程随机数生成器取种子
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_trials: DEFAULT_MAX_TRIALS,
            stop_threshold: DEFAULT_STOP_THRESHOLD,
            seed: None,
        }
    }
}

/// 每种牌型出现的次数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub flush: u32,
    pub pair: u32,
    pub two_pair: u32,
    pub three_of_a_kind: u32,
    pub four_of_a_kind: u32,
    pub full_house: u32,
}

impl CategoryCounts {
    fn record(&mut self, hand: &Hand) {
        self.flush += hand.is_flush() as u32;
        self.pair += hand.is_pair() as u32;
        self.two_pair += hand.is_2_pair() as u32;
        self.three_of_a_kind += hand.is_3_kind() as u32;
        self.four_of_a_kind += hand.is_4_kind() as u32;
        self.full_house += hand.is_full_house() as u32;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// 达到试验次数上限
    TrialCap,
    /// 概率达到了停止阈值
    ThresholdReached,
}

/// 一次模拟的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub trials: u32,
    pub flushes: u32,
    /// 最终的同花概率（百分比）
    pub probability: f64,
    /// 第 i 个元素是前 i+1 次试验后的同花概率
    pub series: Vec<f64>,
    pub categories: CategoryCounts,
    pub stop_reason: StopReason,
}

impl SimulationReport {
    /// 结果摘要，概率保留两位小数
    pub fn summary(&self) -> String {
        format!("抽取 {} 次后，得到同花的概率为 {:.2}%！", self.trials, self.probability)
    }
}

/// 蒙特卡洛模拟：反复新建牌组、洗牌、发一手牌并统计同花
pub struct Simulation {
    config: SimulationConfig,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Simulation {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Simulation { config, rng }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(&mut self) -> SimulationReport {
        let mut report = SimulationReport {
            trials: 0,
            flushes: 0,
            probability: 0.0,
            series: Vec::with_capacity(self.config.max_trials as usize),
            categories: CategoryCounts::default(),
            stop_reason: StopReason::TrialCap,
        };

        for trial in 1..=self.config.max_trials {
            // 每次试验都用一副新牌
            let mut deck = Deck::new();
            deck.shuffle_with(&mut self.rng);
            let hand = Hand::new(&deck);
            trace!(trial, hand = %hand, sorted = ?hand.sorted().map(|c| c.to_string()), "发牌");

            report.categories.record(&hand);
            if hand.is_flush() {
                report.flushes += 1;
            }

            let probability = report.flushes as f64 / trial as f64 * 100.0;
            report.trials = trial;
            report.probability = probability;
            report.series.push(probability);

            if trial % PROGRESS_INTERVAL == 0 {
                debug!(trial, flushes = report.flushes, probability, "模拟进度");
            }

            if probability >= self.config.stop_threshold {
                report.stop_reason = StopReason::ThresholdReached;
                break;
            }
        }

        match report.stop_reason {
            StopReason::ThresholdReached => info!(
                "第 {} 次试验后概率 {:.2}% 达到阈值 {}%，提前停止",
                report.trials, report.probability, self.config.stop_threshold
            ),
            StopReason::TrialCap => info!("已完成全部 {} 次试验", report.trials),
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_trials: u32, stop_threshold: f64, seed: u64) -> SimulationConfig {
        SimulationConfig { max_trials, stop_threshold, seed: Some(seed) }
    }

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.max_trials, 20_000);
        assert_eq!(config.stop_threshold, 99.9);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = Simulation::new(config(2_000, 101.0, 2024)).run();
        let b = Simulation::new(config(2_000, 101.0, 2024)).run();
        assert_eq!(a.flushes, b.flushes);
        assert_eq!(a.series, b.series);
        assert_eq!(a.categories, b.categories);
    }

    #[test]
    fn test_stops_at_trial_cap() {
        let report = Simulation::new(config(500, 101.0, 1)).run();
        assert_eq!(report.trials, 500);
        assert_eq!(report.series.len(), 500);
        assert_eq!(report.stop_reason, StopReason::TrialCap);
    }

    #[test]
    fn test_stops_when_threshold_reached() {
        let report = Simulation::new(config(500, 0.0, 1)).run();
        assert_eq!(report.trials, 1);
        assert_eq!(report.series.len(), 1);
        assert_eq!(report.stop_reason, StopReason::ThresholdReached);
    }

    #[test]
    fn test_zero_trials() {
        let report = Simulation::new(config(0, 99.9, 1)).run();
        assert_eq!(report.trials, 0);
        assert_eq!(report.probability, 0.0);
        assert!(report.series.is_empty());
        assert_eq!(report.stop_reason, StopReason::TrialCap);
    }

    #[test]
    fn test_report_is_consistent() {
        let report = Simulation::new(config(3_000, 101.0, 99)).run();
        assert_eq!(report.categories.flush, report.flushes);
        assert_eq!(report.series.last().copied(), Some(report.probability));
        assert_eq!(
            report.probability,
            report.flushes as f64 / report.trials as f64 * 100.0
        );
        // 葫芦同时计入三条和一对
        assert!(report.categories.full_house <= report.categories.three_of_a_kind);
        assert!(report.categories.two_pair <= report.categories.pair);
        // 一对大约 42%，远多于同花
        assert!(report.categories.pair > report.categories.flush);
        assert!(report.series.iter().all(|p| (0.0..=100.0).contains(p)));
    }

    #[test]
    fn test_summary_format() {
        let report = SimulationReport {
            trials: 20_000,
            flushes: 39,
            probability: 0.1955,
            series: vec![],
            categories: CategoryCounts::default(),
            stop_reason: StopReason::TrialCap,
        };
        assert_eq!(report.summary(), "抽取 20000 次后，得到同花的概率为 0.20%！");
    }
}
