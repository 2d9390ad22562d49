//! 商品数据模型

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// 未指定发布者时使用的占位 ownerId
pub const DEFAULT_OWNER_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub titulo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categoria: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provincia: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fecha_publicacion: String,
    #[serde(default = "default_owner_id", deserialize_with = "null_as_default_owner")]
    pub owner_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

fn default_owner_id() -> i64 {
    DEFAULT_OWNER_ID
}

/// `null` 与缺省等价
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_owner<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_OWNER_ID))
}

/// 创建商品请求，只有 titulo 与 descripcion 为必填
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(
        required(message = "titulo 为必填字段"),
        length(min = 1, message = "titulo 不能为空")
    )]
    pub titulo: Option<String>,
    #[validate(
        required(message = "descripcion 为必填字段"),
        length(min = 1, message = "descripcion 不能为空")
    )]
    pub descripcion: Option<String>,
    pub categoria: Option<String>,
    pub provincia: Option<String>,
    pub fecha_publicacion: Option<String>,
    pub owner_id: Option<i64>,
}

impl CreateProductRequest {
    /// 用给定 id 与时间戳补全默认值，生成待存储的记录
    ///
    /// 空字符串与缺省等价；ownerId 为 0 时同样使用占位值。
    pub fn into_product(self, id: i64, now: &str) -> Product {
        Product {
            id,
            titulo: self.titulo.unwrap_or_default(),
            descripcion: self.descripcion.unwrap_or_default(),
            categoria: self.categoria.unwrap_or_default(),
            provincia: self.provincia.unwrap_or_default(),
            fecha_publicacion: self
                .fecha_publicacion
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| now.to_string()),
            owner_id: self
                .owner_id
                .filter(|&owner| owner != 0)
                .unwrap_or(DEFAULT_OWNER_ID),
            created_at: now.to_string(),
        }
    }
}

/// 当前 UTC 时间，毫秒精度，形如 `2024-05-01T10:00:00.000Z`
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
