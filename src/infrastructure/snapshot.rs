//! 数据快照基础设施
//!
//! 启动时读取一次 JSON 快照，运行期间的写入不会回写到文件。

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::app::productos::model::{null_as_default, Product};

/// 快照文件内容，缺失或为 null 的段按空数组处理
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub productos: Vec<Product>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usuarios: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mensajes: Vec<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("读取快照失败: {0}")]
    Read(#[from] io::Error),
    #[error("解析快照失败: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Snapshot {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// 读取快照；失败时记录警告并返回空快照
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(snapshot) => {
                info!(
                    productos = snapshot.productos.len(),
                    usuarios = snapshot.usuarios.len(),
                    mensajes = snapshot.mensajes.len(),
                    "已加载数据快照 {}",
                    path.display()
                );
                snapshot
            }
            Err(e) => {
                warn!("无法读取 {}，使用空的内存数据: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
