//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 每次导航、浏览器前进/后退以及会话变化时都执行一次 `guard`。

use leptos::logging::log;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardOutcome, guard};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 会话状态以信号注入，路由不直接读取本地存储。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    has_session: Signal<bool>,
}

impl RouterService {
    fn new(has_session: Signal<bool>) -> Self {
        // 初次加载也要经过守卫：直接打开受保护地址时改写为登录页
        let path = current_path();
        let initial = match guard(AppRoute::from_path(&path), has_session.get_untracked()) {
            GuardOutcome::Render(route) => route,
            GuardOutcome::Redirect(redirect) => {
                log!("[Router] No session for {}. Redirecting to {}.", path, redirect);
                replace_history_state(redirect.to_path());
                redirect
            }
        };
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            has_session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 放行时保留请求的原始路径（未知地址不会被改写成 /404）。
    pub fn navigate(&self, path: &str) {
        let target = AppRoute::from_path(path);
        match guard(target, self.has_session.get_untracked()) {
            GuardOutcome::Render(route) => {
                push_history_state(path);
                self.set_route.set(route);
            }
            GuardOutcome::Redirect(redirect) => {
                log!("[Router] Access denied to {}. Redirecting to {}.", path, redirect);
                push_history_state(redirect.to_path());
                self.set_route.set(redirect);
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let has_session = self.has_session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            match guard(AppRoute::from_path(&path), has_session.get_untracked()) {
                GuardOutcome::Render(route) => set_route.set(route),
                GuardOutcome::Redirect(redirect) => {
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话结束时离开受保护页面
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let has_session = self.has_session;

        Effect::new(move |_| {
            let has = has_session.get();
            let route = current_route.get_untracked();

            if let GuardOutcome::Redirect(redirect) = guard(route, has) {
                push_history_state(redirect.to_path());
                set_route.set(redirect);
                log!("[Router] Session ended, redirecting to {}.", redirect);
            }
        });
    }
}

fn provide_router(has_session: Signal<bool>) -> RouterService {
    let router = RouterService::new(has_session);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 会话状态信号
    has_session: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(has_session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接：拦截点击，交给路由服务导航
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(to.to_path());
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
