use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 键存在但取值失败（反序列化错误、后端连接异常等）
    ExistsButNoValue,
}

/// 对象缓存后端抽象。实现以字符串键值对为底层存储，
/// 类型化的 get/insert 通过 JSON 序列化提供。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::warn!("Failed to deserialize cached value for key '{}': {}", key, e);
                    CacheResult::ExistsButNoValue
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    /// ttl 为 0 时由后端使用默认 TTL
    pub async fn insert<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => {
                tracing::error!("Failed to serialize value for cache key '{}': {}", key, e);
            }
        }
    }
}

/// 声明一个对象缓存插件，在程序启动时自动注册到插件表。
/// 构造函数要求 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $plugin:ident) => {
        ::paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_plugin_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $plugin::new().map_err(|e| {
                                $crate::errors::GradeSystemError::cache_connection(e)
                            })?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                    }),
                );
            }
        }
    };
}
