use crate::auth::{sign_out, use_auth};
use crate::components::icons::{CloudSun, LogOut};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

/// 常驻导航栏
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();

    let display_name = move || {
        auth.session
            .with(|s| s.as_ref().map(|s| s.profile.label().to_string()))
    };

    view! {
        <div class="navbar bg-base-100 shadow-xl">
            <div class="flex-1 gap-2">
                <CloudSun attr:class="text-primary h-6 w-6" />
                <Link to=AppRoute::Home class="btn btn-ghost text-xl">"SkyRoster"</Link>
                <Link to=AppRoute::Home class="btn btn-ghost btn-sm">"Home"</Link>
                <Link to=AppRoute::Users class="btn btn-ghost btn-sm">"Users"</Link>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=move || display_name().is_some()
                    fallback=|| view! {
                        <Link to=AppRoute::Login class="btn btn-ghost btn-sm">"Login"</Link>
                        <Link to=AppRoute::SignUp class="btn btn-primary btn-sm">"Sign up"</Link>
                    }
                >
                    <span class="badge badge-neutral hidden md:inline-flex">
                        {move || display_name().unwrap_or_default()}
                    </span>
                    <button on:click=move |_| sign_out(&auth) class="btn btn-outline btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Sign out"
                    </button>
                </Show>
            </div>
        </div>
    }
}
