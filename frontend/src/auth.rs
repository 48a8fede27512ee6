//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的会话信号检查是否已登录。

use leptos::logging::{log, warn};
use leptos::prelude::*;
use skyroster::{Credentials, Session, SessionManager, SkyResult};

use crate::api::Services;
use crate::web::LocalStorage;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: ReadSignal<Option<Session>>,
    pub set_session: WriteSignal<Option<Session>>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (session, set_session) = signal(None);
        Self {
            session,
            set_session,
        }
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn has_session_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Option::is_some))
    }

    /// 当前会话令牌
    pub fn token(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.as_ref().map(|s| s.token.clone()))
    }
}

fn session_manager() -> SessionManager<LocalStorage> {
    SessionManager::new(LocalStorage)
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 启动时从 LocalStorage 恢复会话
pub fn init_auth(ctx: &AuthContext) {
    let restored = session_manager().restore();
    if let Some(session) = &restored {
        log!("[Auth] Restored session for {}", session.profile.label());
    }
    ctx.set_session.set(restored);
}

/// 邮箱密码登录
pub async fn sign_in(
    ctx: &AuthContext,
    services: &Services,
    email: &str,
    password: &str,
) -> SkyResult<()> {
    let credentials = Credentials::new(email, password)?;
    let user = services.identity().sign_in(&credentials).await?;
    let (session, persisted) = session_manager().establish(&user, None);
    if let Err(e) = persisted {
        warn!("[Auth] Session not persisted: {}", e);
    }
    log!("[Auth] Signed in as {}", session.profile.email);
    ctx.set_session.set(Some(session));
    Ok(())
}

/// 注册新账户
///
/// 姓名只保存为本地资料的显示名，不发送给身份服务。
pub async fn sign_up(
    ctx: &AuthContext,
    services: &Services,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> SkyResult<()> {
    let credentials = Credentials::new(email, password)?;
    let user = services.identity().sign_up(&credentials).await?;

    let display_name = format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_string();
    let (session, persisted) = session_manager().establish(&user, Some(display_name));
    if let Err(e) = persisted {
        warn!("[Auth] Session not persisted: {}", e);
    }
    log!("[Auth] Registered {}", session.profile.email);
    ctx.set_session.set(Some(session));
    Ok(())
}

/// 退出登录
///
/// 导航由路由服务的会话监听自动处理。
pub fn sign_out(ctx: &AuthContext) {
    session_manager().clear();
    ctx.set_session.set(None);
    log!("[Auth] Signed out");
}
