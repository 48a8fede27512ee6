//! 服务入口
//!
//! 由构建时捕获的 `SKYROSTER_*` 变量生成配置，并按需构造各个网关。

use leptos::prelude::*;
use skyroster::config::{
    ENV_FIRESTORE_BASE_URL, ENV_IDENTITY_API_KEY, ENV_IDENTITY_BASE_URL, ENV_PROJECT_ID,
    ENV_USERS_COLLECTION, ENV_WEATHER_API_KEY, ENV_WEATHER_BASE_URL,
};
use skyroster::{AppConfig, FirestoreStore, IdentityGateway, UserDirectory, WeatherGateway};

use crate::web::FetchClient;

/// 构建时环境变量查找
fn build_env(name: &str) -> Option<String> {
    let value = match name {
        ENV_IDENTITY_API_KEY => option_env!("SKYROSTER_IDENTITY_API_KEY"),
        ENV_PROJECT_ID => option_env!("SKYROSTER_PROJECT_ID"),
        ENV_WEATHER_API_KEY => option_env!("SKYROSTER_WEATHER_API_KEY"),
        ENV_IDENTITY_BASE_URL => option_env!("SKYROSTER_IDENTITY_BASE_URL"),
        ENV_FIRESTORE_BASE_URL => option_env!("SKYROSTER_FIRESTORE_BASE_URL"),
        ENV_WEATHER_BASE_URL => option_env!("SKYROSTER_WEATHER_BASE_URL"),
        ENV_USERS_COLLECTION => option_env!("SKYROSTER_USERS_COLLECTION"),
        _ => None,
    };
    value.map(str::to_string)
}

#[derive(Clone, Debug)]
pub struct Services {
    config: AppConfig,
}

impl Services {
    pub fn from_build_env() -> Self {
        Self {
            config: AppConfig::from_lookup(build_env),
        }
    }

    pub fn identity(&self) -> IdentityGateway<FetchClient> {
        IdentityGateway::new(
            FetchClient,
            self.config.identity_base_url.clone(),
            self.config.identity_api_key.clone(),
        )
    }

    pub fn weather(&self) -> WeatherGateway<FetchClient> {
        WeatherGateway::new(
            FetchClient,
            self.config.weather_base_url.clone(),
            self.config.weather_api_key.clone(),
        )
    }

    /// 以会话令牌访问用户集合
    pub fn directory(&self, token: Option<String>) -> UserDirectory<FirestoreStore<FetchClient>> {
        let store = FirestoreStore::new(FetchClient, self.config.documents_root()).with_token(token);
        UserDirectory::new(store, self.config.users_collection.clone())
    }
}

pub fn use_services() -> Services {
    use_context::<Services>().expect("Services should be provided")
}
