use crate::card::{write_card_list, Card, Deck, InvalidValueError, Rank};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const HAND_SIZE: usize = 5;

/// 一手 5 张牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: [Card; HAND_SIZE],
}

impl Hand {
    /// 取牌组当前顺序的前 5 张。
    ///
    /// 调用方负责事先洗牌。牌组本身不会被修改，
    /// 所以对同一副牌重复调用会得到同样的 5 张；模拟中每次试验都新建牌组。
    pub fn new(deck: &Deck) -> Hand {
        let cards = std::array::from_fn(|i| deck.cards()[i]);
        Hand { cards }
    }

    pub fn from_cards(cards: [Card; HAND_SIZE]) -> Hand {
        Hand { cards }
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    /// 按点数从小到大排序后的视图（稳定排序，同点数保持原有顺序）
    pub fn sorted(&self) -> [Card; HAND_SIZE] {
        let mut cards = self.cards;
        cards.sort_by_key(|c| c.rank());
        cards
    }

    /// 同花：5 张牌花色相同
    pub fn is_flush(&self) -> bool {
        self.cards.windows(2).all(|w| w[0].suit() == w[1].suit())
    }

    /// 某个点数正好出现 2 次
    pub fn is_pair(&self) -> bool {
        self.has_rank_count(2)
    }

    /// 某个点数正好出现 3 次
    pub fn is_3_kind(&self) -> bool {
        self.has_rank_count(3)
    }

    /// 某个点数正好出现 4 次
    pub fn is_4_kind(&self) -> bool {
        self.has_rank_count(4)
    }

    /// 葫芦：三条加一对。5 张牌里两者同时成立只可能是 3+2
    pub fn is_full_house(&self) -> bool {
        self.is_3_kind() && self.is_pair()
    }

    /// 两对：只剩 3 种点数，且不是三条带两张散牌
    pub fn is_2_pair(&self) -> bool {
        self.rank_counts().len() == 3 && !self.is_3_kind()
    }

    fn has_rank_count(&self, n: u8) -> bool {
        self.rank_counts().values().any(|&count| count == n)
    }

    fn rank_counts(&self) -> HashMap<Rank, u8> {
        let mut counts: HashMap<Rank, u8> = HashMap::new();
        for card in &self.cards {
            *counts.entry(card.rank()).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_card_list(f, &self.cards)
    }
}

impl FromStr for Hand {
    type Err = InvalidValueError;

    /// 以空白分隔的 5 张牌，例如 `"2♣ 2♦ 5♥ 5♠ 9♣"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = s
            .split_whitespace()
            .map(|card| card.parse::<Card>())
            .collect::<Result<Vec<_>, _>>()?;
        let len = cards.len();
        let cards: [Card; HAND_SIZE] = cards
            .try_into()
            .map_err(|_| InvalidValueError::HandSize(len))?;
        Ok(Hand { cards })
    }
}
