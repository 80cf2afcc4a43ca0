//! 问句意图识别。
//!
//! 只做关键字匹配，不做语义理解。结果是封闭枚举，`Unknown` 是正式结果而非兜底：
//! 调用方必须显式处理。

/// 阈值比较方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdOp {
    GreaterThan,
    LessThan,
    Exactly,
}

impl ThresholdOp {
    pub fn apply(self, count: usize, value: usize) -> bool {
        match self {
            ThresholdOp::GreaterThan => count > value,
            ThresholdOp::LessThan => count < value,
            ThresholdOp::Exactly => count == value,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ThresholdOp::GreaterThan => ">",
            ThresholdOp::LessThan => "<",
            ThresholdOp::Exactly => "=",
        }
    }
}

/// 问句意图。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// 不同取值的个数
    Count,
    /// 取值列表
    List,
    /// 每个取值的记录数
    Distribution,
    /// 记录数最多的前 N 个取值
    TopN(usize),
    /// 记录数满足阈值的取值；`value` 为 None 表示问句里找不到数字
    Threshold {
        op: ThresholdOp,
        value: Option<usize>,
    },
    Unknown,
}

/// 未给出数字时 top-N 的默认值。
pub const DEFAULT_TOP_N: usize = 5;

const WORD_NUMBERS: [&str; 15] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen",
];

// 第三项为 true 的单词短语只有紧跟数字时才算阈值（"over 2"），
// 避免 "distribution over all systems" 之类的措辞被识别为阈值。
const THRESHOLD_PHRASES: &[(&[&str], ThresholdOp, bool)] = &[
    (&["more", "than"], ThresholdOp::GreaterThan, false),
    (&["greater", "than"], ThresholdOp::GreaterThan, false),
    (&["over"], ThresholdOp::GreaterThan, true),
    (&["above"], ThresholdOp::GreaterThan, true),
    (&[">"], ThresholdOp::GreaterThan, true),
    (&["less", "than"], ThresholdOp::LessThan, false),
    (&["fewer", "than"], ThresholdOp::LessThan, false),
    (&["under"], ThresholdOp::LessThan, true),
    (&["below"], ThresholdOp::LessThan, true),
    (&["<"], ThresholdOp::LessThan, true),
    (&["exactly"], ThresholdOp::Exactly, false),
];

const DISTRIBUTION_WORDS: &[&str] = &["distribution", "breakdown", "distribute", "per", "each", "group"];
const LIST_WORDS: &[&str] = &["list", "show", "which", "display", "enumerate"];
const COUNT_WORDS: &[&str] = &["count", "unique", "distinct", "number", "many"];

/// 舱室问句中可被计数的设备名词（单数）。
const DEVICE_NOUNS: &[&str] = &[
    "device", "phone", "handset", "ap", "wap", "access", "tv", "television", "screen", "switch",
    "port", "outlet", "socket", "cable", "connection", "endpoint", "unit",
];

/// 数字前出现这些词时，数字即每舱设备数（"cabins with 2"）。
const COUNT_PREPOSITIONS: &[&str] = &["with", "have", "has", "having", "containing"];

/// 解析数字（阿拉伯数字或 one..fifteen）。
pub fn parse_number(token: &str) -> Option<usize> {
    let token = token.trim().to_ascii_lowercase();
    if let Ok(number) = token.parse::<usize>() {
        return Some(number);
    }
    WORD_NUMBERS
        .iter()
        .position(|word| *word == token)
        .map(|index| index + 1)
}

/// 分词：字母数字与下划线组成词，`>` `<` 单独成词，其余字符为分隔符。
pub fn tokenize(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in query.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.extend(ch.to_lowercase());
            continue;
        }
        if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        if ch == '>' || ch == '<' {
            tokens.push(ch.to_string());
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

// `accept` 以短语结束位置为参数，决定该处命中是否有效。
fn find_phrase(tokens: &[String], phrase: &[&str], accept: impl Fn(usize) -> bool) -> Option<usize> {
    tokens
        .windows(phrase.len())
        .enumerate()
        .find(|(start, window)| {
            window.iter().zip(phrase).all(|(token, word)| token == word)
                && accept(start + phrase.len())
        })
        .map(|(start, _)| start)
}

/// 阈值短语与其后的第一个数字。
pub fn extract_threshold(query: &str) -> Option<(ThresholdOp, Option<usize>)> {
    let tokens = tokenize(query);
    let number_at = |index: usize| tokens.get(index).and_then(|token| parse_number(token)).is_some();
    THRESHOLD_PHRASES
        .iter()
        .filter_map(|(phrase, op, needs_number)| {
            find_phrase(&tokens, phrase, |end| !needs_number || number_at(end))
                .map(|start| (start, phrase.len(), *op))
        })
        .min_by_key(|(start, _, _)| *start)
        .map(|(start, len, op)| {
            let value = tokens[start + len..].iter().find_map(|token| parse_number(token));
            (op, value)
        })
}

fn is_device_noun(token: &str) -> bool {
    let singular = [Some(token), token.strip_suffix("es"), token.strip_suffix('s')];
    singular
        .into_iter()
        .flatten()
        .any(|word| DEVICE_NOUNS.contains(&word))
}

/// 舱室问句里不带比较词的数字（"how many cabins have 2 phones"）。
///
/// - 问句中没有数字：None
/// - 数字后一到两个词内是设备名词，或数字前是 with/have 等词：`Some(Some(n))`
/// - 有数字但无法判断所指：`Some(None)`
pub fn extract_device_count(query: &str) -> Option<Option<usize>> {
    let tokens = tokenize(query);
    let mut seen_number = false;
    for (index, token) in tokens.iter().enumerate() {
        let Some(value) = parse_number(token) else {
            continue;
        };
        seen_number = true;
        let before_noun = tokens
            .iter()
            .skip(index + 1)
            .take(2)
            .any(|next| is_device_noun(next));
        let after_preposition = index
            .checked_sub(1)
            .and_then(|prev| tokens.get(prev))
            .is_some_and(|prev| COUNT_PREPOSITIONS.contains(&prev.as_str()));
        if before_noun || after_preposition {
            return Some(Some(value));
        }
    }
    seen_number.then_some(None)
}

/// 识别问句意图。
///
/// 优先级：阈值 > top-N > 分布 > 列表 > 计数；只有 "what" 的问句按列表处理。
pub fn classify_intent(query: &str) -> QueryIntent {
    if let Some((op, value)) = extract_threshold(query) {
        return QueryIntent::Threshold { op, value };
    }
    let tokens = tokenize(query);
    let has = |words: &[&str]| tokens.iter().any(|token| words.contains(&token.as_str()));

    if let Some(index) = tokens.iter().position(|token| token == "top") {
        let n = tokens
            .get(index + 1)
            .and_then(|token| parse_number(token))
            .unwrap_or(DEFAULT_TOP_N);
        return QueryIntent::TopN(n);
    }
    if has(DISTRIBUTION_WORDS) {
        return QueryIntent::Distribution;
    }
    if has(LIST_WORDS) {
        return QueryIntent::List;
    }
    if has(COUNT_WORDS) {
        return QueryIntent::Count;
    }
    if has(&["what"]) {
        return QueryIntent::List;
    }
    QueryIntent::Unknown
}
