//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们是否需要会话，以及守卫决策。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 天气查询 (需要会话)
    #[default]
    Home,
    /// 用户表格 (需要会话)
    Users,
    /// 登录页面
    Login,
    /// 注册页面
    SignUp,
    /// 页面未找到 (与受保护页面同属一棵子树，同样需要会话)
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/user" => Self::Users,
            "/login" => Self::Login,
            "/signup" => Self::SignUp,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Users => "/user",
            Self::Login => "/login",
            Self::SignUp => "/signup",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要会话**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Home | Self::Users | Self::NotFound)
    }

    /// 获取没有会话时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render(AppRoute),
    Redirect(AppRoute),
}

/// 受保护路由在没有会话时重定向到登录页，其余一律放行
///
/// 已有会话访问登录/注册页不会被重定向。
pub fn guard(route: AppRoute, has_session: bool) -> GuardOutcome {
    if route.requires_auth() && !has_session {
        GuardOutcome::Redirect(AppRoute::auth_failure_redirect())
    } else {
        GuardOutcome::Render(route)
    }
}
