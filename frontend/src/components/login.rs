use crate::api::use_services;
use crate::auth::{sign_in, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let services = use_services();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let services = services.clone();
        spawn_local(async move {
            let result = sign_in(
                &auth,
                &services,
                &email.get_untracked(),
                &password.get_untracked(),
            )
            .await;
            match result {
                Ok(()) => router.navigate(AppRoute::Home.to_path()),
                Err(e) => {
                    warn!("[Auth] Sign-in failed: {}", e);
                    set_error_msg.set(Some(e.message().to_string()));
                }
            }
        });
    };

    view! {
        <div class="hero py-12">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Login"</h1>
                    <p class="text-base-content/70">"Sign in with your email and password"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" type="submit">"Login"</button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account? "
                            <Link to=AppRoute::SignUp class="link link-primary">"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
