//! 问答路由。
//!
//! 按关键字把问句分派给服务聚合、舱室分布或字段分布引擎，返回结构化结果；
//! 文字化呈现由调用方负责。

use crate::cabin::{
    cabin_composition, cabin_distribution, cabins_with_exactly, cabins_with_fewer_than,
    cabins_with_more_than, top_cabins,
};
use crate::field::{FieldAnswer, answer_for};
use crate::intent::{
    DEFAULT_TOP_N, QueryIntent, ThresholdOp, classify_intent, extract_device_count, tokenize,
};
use crate::synonyms::{FieldSynonym, match_synonym, mentions, resolve_field};
use domain::{
    CabinBucket, CabinComposition, CabinDistribution, FieldSource, ServiceStatus, ShipTotals,
    SourceTable, TaggedRecord, sort_cabin_ids,
};
use shipnet_aggregate::{ServiceAggregator, combine, unique_cabins};
use tracing::debug;

const STATUS_WORDS: &[&str] = &["online", "offline", "status", "connected", "disconnected"];

/// 路由结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Status {
        systems: Vec<SourceTable>,
    },
    Cabins {
        systems: Vec<SourceTable>,
        intent: QueryIntent,
    },
    Field {
        systems: Vec<SourceTable>,
        synonym: &'static FieldSynonym,
        intent: QueryIntent,
    },
    Unknown,
}

/// 舱室问句的回答。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CabinAnswer {
    /// 有设备的舱室数
    CabinCount { cabins: usize, devices: usize },
    /// 全部舱室号
    Cabins { cabins: Vec<String> },
    /// 满足设备数阈值的舱室
    Threshold {
        op: ThresholdOp,
        value: usize,
        cabins: Vec<String>,
    },
    /// 分桶直方图，附每桶的用户构成
    Distribution {
        distribution: CabinDistribution,
        composition: Vec<(CabinBucket, CabinComposition)>,
    },
    /// 设备数最多的舱室
    Top { cabins: Vec<(String, usize)> },
    ThresholdUndetermined { op: ThresholdOp },
}

/// 问答结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAnswer {
    Status {
        systems: Vec<(SourceTable, ServiceStatus)>,
        totals: ShipTotals,
    },
    /// 每个系统单独分桶：同一舱室在不同系统中的设备不合并计数
    Cabins {
        systems: Vec<(SourceTable, CabinAnswer)>,
    },
    Field {
        systems: Vec<SourceTable>,
        answer: FieldAnswer,
    },
    Unknown,
}

/// 问句涉及的系统：显式指定优先，其次问句关键字，都没有时为全部系统。
pub fn detect_systems(message: &str, hint: Option<SourceTable>) -> Vec<SourceTable> {
    if let Some(system) = hint {
        return vec![system];
    }
    let message = message.to_ascii_lowercase();
    let mentioned: Vec<SourceTable> = SourceTable::ALL
        .into_iter()
        .filter(|system| {
            system
                .keywords()
                .iter()
                .any(|keyword| mentions(&message, keyword))
        })
        .collect();
    if mentioned.is_empty() {
        SourceTable::ALL.to_vec()
    } else {
        mentioned
    }
}

/// 按关键字路由。
pub fn route(message: &str, hint: Option<SourceTable>) -> Route {
    let systems = detect_systems(message, hint);
    let tokens = tokenize(message);
    if tokens
        .iter()
        .any(|token| STATUS_WORDS.contains(&token.as_str()))
    {
        return Route::Status { systems };
    }
    let intent = classify_intent(message);
    match match_synonym(message) {
        Some(synonym) if synonym.is_cabin() => Route::Cabins {
            systems,
            intent: cabin_intent(message, intent),
        },
        Some(synonym) => Route::Field {
            systems,
            synonym,
            intent,
        },
        None => Route::Unknown,
    }
}

/// 舱室问句的意图修正：没有比较词的数字按“恰好 N 台设备”处理；
/// 数字所指无法判断时给出阈值未定，而不是回答无关的总数。
fn cabin_intent(message: &str, intent: QueryIntent) -> QueryIntent {
    if matches!(intent, QueryIntent::Threshold { .. } | QueryIntent::TopN(_)) {
        return intent;
    }
    match extract_device_count(message) {
        Some(Some(value)) => QueryIntent::Threshold {
            op: ThresholdOp::Exactly,
            value: Some(value),
        },
        Some(None) if intent != QueryIntent::Distribution => QueryIntent::Threshold {
            op: ThresholdOp::Exactly,
            value: None,
        },
        _ => intent,
    }
}

/// 回答舱室问句。未识别意图时给出分布。
pub fn answer_cabins<R: FieldSource>(
    system: Option<SourceTable>,
    intent: QueryIntent,
    records: &[R],
) -> CabinAnswer {
    let distribution = cabin_distribution(system, records);
    match intent {
        QueryIntent::Count => CabinAnswer::CabinCount {
            cabins: distribution.cabin_counts.len(),
            devices: distribution.devices_with_cabin,
        },
        QueryIntent::List => {
            let mut cabins: Vec<String> = distribution.cabin_counts.keys().cloned().collect();
            sort_cabin_ids(&mut cabins);
            CabinAnswer::Cabins { cabins }
        }
        QueryIntent::TopN(n) => CabinAnswer::Top {
            cabins: top_cabins(&distribution, if n == 0 { DEFAULT_TOP_N } else { n }),
        },
        QueryIntent::Threshold {
            op,
            value: Some(value),
        } => {
            let cabins = match op {
                ThresholdOp::GreaterThan => cabins_with_more_than(&distribution, value),
                ThresholdOp::LessThan => cabins_with_fewer_than(&distribution, value),
                ThresholdOp::Exactly => cabins_with_exactly(&distribution, value),
            };
            CabinAnswer::Threshold { op, value, cabins }
        }
        QueryIntent::Threshold { op, value: None } => CabinAnswer::ThresholdUndetermined { op },
        QueryIntent::Distribution | QueryIntent::Unknown => {
            let composition = [
                CabinBucket::One,
                CabinBucket::Two,
                CabinBucket::Three,
                CabinBucket::FourPlus,
            ]
            .into_iter()
            .map(|bucket| (bucket, cabin_composition(records, bucket)))
            .collect();
            CabinAnswer::Distribution {
                distribution,
                composition,
            }
        }
    }
}

/// 问答入口：路由后读取所需的表并作答。
#[derive(Clone)]
pub struct ChatRouter {
    aggregator: ServiceAggregator,
}

impl ChatRouter {
    pub fn new(aggregator: ServiceAggregator) -> Self {
        Self { aggregator }
    }

    pub async fn answer(&self, message: &str, hint: Option<SourceTable>) -> ChatAnswer {
        let route = route(message, hint);
        debug!(?route, "chat routed");
        match route {
            Route::Status { systems } => {
                let (statuses, loaded) = futures::join!(
                    self.aggregator.statuses(&systems),
                    self.aggregator.load_many(&systems)
                );
                let cabins = unique_cabins(loaded.iter().flat_map(|(_, records)| records.iter()));
                ChatAnswer::Status {
                    totals: combine(&statuses, cabins.len()),
                    systems: statuses,
                }
            }
            Route::Cabins { systems, intent } => {
                let loaded = self.aggregator.load_many(&systems).await;
                ChatAnswer::Cabins {
                    systems: loaded
                        .into_iter()
                        .map(|(system, records)| {
                            (system, answer_cabins(Some(system), intent, &records))
                        })
                        .collect(),
                }
            }
            Route::Field {
                systems,
                synonym,
                intent,
            } => {
                let records = self.records(&systems).await;
                let answer = match resolve_field(synonym, &records) {
                    Some(field) => answer_for(&field, intent, &records),
                    None => FieldAnswer::FieldUndetermined,
                };
                ChatAnswer::Field { systems, answer }
            }
            Route::Unknown => ChatAnswer::Unknown,
        }
    }

    async fn records(&self, systems: &[SourceTable]) -> Vec<TaggedRecord> {
        self.aggregator
            .load_many(systems)
            .await
            .into_iter()
            .flat_map(|(_, records)| records)
            .collect()
    }
}
