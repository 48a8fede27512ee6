//! SkyRoster 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: 配置与网关入口
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    mod icons;
    pub mod login;
    pub mod navbar;
    pub mod signup;
    pub mod user_table;
    pub mod weather;
}

use crate::api::Services;
use crate::auth::{AuthContext, init_auth};
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::signup::SignUpPage;
use crate::components::user_table::UserTablePage;
use crate::components::weather::WeatherPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，并实现服务层的 I/O 接缝。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <WeatherPage /> }.into_any(),
        AppRoute::Users => view! { <UserTablePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::SignUp => view! { <SignUpPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center py-24">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文与服务入口
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    provide_context(Services::from_build_env());

    // 2. 从 LocalStorage 恢复会话
    init_auth(&auth_ctx);

    // 3. 会话信号注入路由服务
    let has_session = auth_ctx.has_session_signal();

    view! {
        <Router has_session=has_session>
            <div class="min-h-screen bg-base-200 font-sans">
                <Navbar />
                <main class="max-w-5xl mx-auto p-4 md:p-8">
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
}
