//! # 同花概率核心库
//!
//! 这个 `core` crate 包含扑克牌、牌组、一手牌的数据模型，
//! 牌型判断，以及估算同花概率的蒙特卡洛模拟。
//! 它不涉及任何终端或绘图逻辑，可以被任何上层应用复用。

mod card;
mod hand;
mod simulation;

pub use card::*;

pub use hand::*;

pub use simulation::*;
