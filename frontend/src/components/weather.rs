use crate::api::use_services;
use crate::components::icons::Search;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use skyroster_shared::{WeatherCategory, WeatherDisplay};

#[component]
pub fn WeatherPage() -> impl IntoView {
    let services = use_services();

    let (city, set_city) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (display, set_display) = signal(Option::<WeatherDisplay>::None);

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let query = city.get_untracked();
        if query.trim().is_empty() {
            return;
        }

        set_is_loading.set(true);
        let services = services.clone();
        spawn_local(async move {
            match services.weather().lookup(&query).await {
                Ok(Some(result)) => set_display.set(Some(result)),
                Ok(None) => {}
                // 保留上一次的面板
                Err(e) => error!("[Weather] Lookup failed: {}", e),
            }
            set_is_loading.set(false);
        });
    };

    let panel = move || {
        display.get().map(|d| match d {
            WeatherDisplay::Report { report, category } => view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center">
                        <h2 class="card-title">{report.location_label()}</h2>
                        <img src=category.icon_url() alt=category.label() class="w-24 h-24" />
                        <p class="text-lg">{category.label()}</p>
                        <p class="text-4xl font-bold">{format!("{}°C", report.main.temp)}</p>
                    </div>
                </div>
            }
            .into_any(),
            WeatherDisplay::NotFound => {
                let category = WeatherCategory::NotFound;
                view! {
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body items-center text-center">
                            <img src=category.icon_url() alt=category.label() class="w-24 h-24" />
                            <p class="text-lg">{category.label()}</p>
                        </div>
                    </div>
                }
                .into_any()
            }
            WeatherDisplay::Hidden => ().into_any(),
        })
    };

    view! {
        <div class="space-y-6">
            <form class="join w-full" on:submit=on_search>
                <input
                    type="text"
                    placeholder="Enter a city"
                    on:input=move |ev| set_city.set(event_target_value(&ev))
                    prop:value=city
                    class="input input-bordered join-item w-full"
                />
                <button type="submit" class="btn btn-primary join-item">
                    <Search attr:class="h-4 w-4" />
                </button>
            </form>

            <Show when=move || is_loading.get()>
                <div class="flex justify-center">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            {move || if is_loading.get() { None } else { panel() }}
        </div>
    }
}
