use rand::Rng;
use rand::prelude::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// --- 错误类型 ---

/// 构造牌时传入了无法识别的点数或花色
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidValueError {
    #[error("无效的点数 `{0}`，必须是 2 3 4 5 6 7 8 9 10 J Q K A 之一")]
    Rank(String),

    #[error("无效的花色 `{0}`，必须是 ♣ ♦ ♥ ♠ 之一")]
    Suit(String),

    #[error("无法解析的牌 `{0}`，格式应为 <点数><花色>，例如 10♥")]
    Card(String),

    #[error("一手牌必须正好 5 张，实际为 {0} 张")]
    HandSize(usize),
}

// --- 核心数据结构定义 ---

/// 花色 (Suit)
/// 花色之间没有大小之分，所以不派生 Ord
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Suit {
    Club,    // 梅花 ♣
    Diamond, // 方块 ♦
    Heart,   // 红心 ♥
    Spade,   // 黑桃 ♠
}

impl Suit {
    /// 标准顺序，与牌组的构造顺序一致
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Club => "♣",
            Suit::Diamond => "♦",
            Suit::Heart => "♥",
            Suit::Spade => "♠",
        }
    }
}

/// 点数 (Rank)
/// Ord 的派生让 2 最小、Ace 最大
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl FromStr for Rank {
    type Err = InvalidValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .into_iter()
            .find(|rank| rank.symbol() == s)
            .ok_or_else(|| InvalidValueError::Rank(s.to_string()))
    }
}

impl FromStr for Suit {
    type Err = InvalidValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.symbol() == s)
            .ok_or_else(|| InvalidValueError::Suit(s.to_string()))
    }
}

/// 单张扑克牌 (Card)
///
/// 派生的 `==` 比较点数和花色，只用于牌组的记账。
/// 牌面大小的比较请使用 [`Card::outranks`] 和 [`Card::same_rank`]，两者都只看点数。
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// 通过符号构造，例如 `Card::parse("10", "♥")`
    pub fn parse(rank: &str, suit: &str) -> Result<Card, InvalidValueError> {
        Ok(Card { rank: rank.parse()?, suit: suit.parse()? })
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// 点数严格大于对方时返回 true
    pub fn outranks(&self, other: &Card) -> bool {
        self.rank > other.rank
    }

    /// 点数相同时返回 true，忽略花色
    pub fn same_rank(&self, other: &Card) -> bool {
        self.rank == other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = InvalidValueError;

    /// 解析 `Display` 输出的格式：花色符号在最后
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (idx, _) = s
            .char_indices()
            .last()
            .ok_or_else(|| InvalidValueError::Card(s.to_string()))?;
        if idx == 0 {
            return Err(InvalidValueError::Card(s.to_string()));
        }
        let (rank, suit) = s.split_at(idx);
        Card::parse(rank, suit)
    }
}

// --- 牌组 ---

pub const DECK_SIZE: usize = 52;

/// 一副完整的 52 张扑克牌
///
/// 长度由类型保证，构造后永远是 52 张，洗牌只改变顺序。
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
}

impl Deck {
    /// 按点数为主、花色为辅的标准顺序创建：2♣ 2♦ 2♥ 2♠ 3♣ ...
    pub fn new() -> Deck {
        let cards = std::array::from_fn(|i| Card {
            rank: Rank::ALL[i / Suit::ALL.len()],
            suit: Suit::ALL[i % Suit::ALL.len()],
        });
        Deck { cards }
    }

    /// 用线程本地随机数生成器洗牌
    pub fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.shuffle_with(&mut rng);
    }

    /// 用调用方提供的随机数生成器洗牌，固定种子时结果可复现
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card; DECK_SIZE] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_card_list(f, &self.cards)
    }
}

/// 以 `[2♣, 3♦, ...]` 的形式输出一组牌
pub(crate) fn write_card_list(f: &mut fmt::Formatter, cards: &[Card]) -> fmt::Result {
    write!(f, "[")?;
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", card)?;
    }
    write!(f, "]")
}

// --- 单元测试 ---
