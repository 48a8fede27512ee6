use crate::api::use_services;
use crate::auth::{sign_up, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 带标签的文本输入框
#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                on:input=move |ev| set_value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered"
            />
        </div>
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = use_auth();
    let services = use_services();
    let router = use_router();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let services = services.clone();
        spawn_local(async move {
            let result = sign_up(
                &auth,
                &services,
                &first_name.get_untracked(),
                &last_name.get_untracked(),
                &email.get_untracked(),
                &password.get_untracked(),
            )
            .await;
            set_is_submitting.set(false);
            match result {
                Ok(()) => router.navigate(AppRoute::Login.to_path()),
                Err(e) => {
                    warn!("[Auth] Sign-up failed: {}", e);
                    set_error_msg.set(Some(e.message().to_string()));
                }
            }
        });
    };

    view! {
        <div class="hero py-12">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Sign up"</h1>
                    <p class="text-base-content/70">"Create an account to continue"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="grid grid-cols-2 gap-2">
                            <Field id="first-name" label="First name" value=first_name set_value=set_first_name />
                            <Field id="last-name" label="Last name" value=last_name set_value=set_last_name />
                        </div>
                        <Field id="email" label="Email" kind="email" value=email set_value=set_email />
                        <Field id="password" label="Password" kind="password" value=password set_value=set_password />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" type="submit" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link to=AppRoute::Login class="link link-primary">"Login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
