// ==========================================
// JIT 窗口分配系统 - 订单领域模型
// ==========================================
// 职责: JIT Call 订单（已完成类型转换）
// 用途: 导入层写入, 引擎层只读
// ==========================================

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// Order - JIT Call 订单
// ==========================================
// 派生字段（交付时间戳、星期）由 TimeNormalizer 计算，不在此缓存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,                         // JIT Call No（不透明标识）
    pub vendor: String,                     // 供应商（比较时大小写不敏感）
    pub required_date: Option<NaiveDate>,   // Require Date（无法解析 → None）
    #[serde(with = "optional_duration_seconds")]
    pub required_time: Option<Duration>,    // Require Time（距零点的时长，可超过 24h）
    pub row_number: usize,                  // 源文件行号（1 起，不含表头）
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        vendor: impl Into<String>,
        required_date: Option<NaiveDate>,
        required_time: Option<Duration>,
    ) -> Self {
        Self {
            id: id.into(),
            vendor: vendor.into(),
            required_date,
            required_time,
            row_number: 0,
        }
    }
}

/// chrono::Duration 没有 serde 实现，按秒（浮点）序列化
mod optional_duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => {
                let micros = d.num_microseconds().unwrap_or(i64::MAX);
                s.serialize_some(&(micros as f64 / 1_000_000.0))
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let secs: Option<f64> = Option::deserialize(d)?;
        Ok(secs
            .filter(|v| v.is_finite())
            .map(|v| Duration::microseconds((v * 1_000_000.0).round() as i64)))
    }
}
