use crate::api::{Services, use_services};
use crate::auth::{AuthContext, use_auth};
use crate::components::icons::{AlertTriangle, Trash2, UserPlus};
use chrono::{Local, Utc};
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use skyroster_shared::{
    MutationKind, MutationState, SortColumn, SortDirection, UserId, UserRecord, UserTable,
    locale_date_string, parse_date_input,
};

/// 重新加载表格；失败时记录日志并保留空表
fn reload(services: Services, auth: AuthContext, table: RwSignal<UserTable>, loading: RwSignal<bool>) {
    loading.set(true);
    spawn_local(async move {
        match services.directory(auth.token()).load_active().await {
            Ok(snapshot) => {
                for q in &snapshot.quarantined {
                    warn!("[Users] Skipping malformed document {}: {}", q.id, q.reason);
                }
                log!("[Users] Loaded {} active users", snapshot.records.len());
                table.update(|t| t.replace_all(snapshot.records));
            }
            Err(e) => {
                error!("[Users] Load failed: {}", e);
                table.update(|t| t.replace_all(Vec::new()));
            }
        }
        loading.set(false);
    });
}

#[component]
fn SortHeader(column: SortColumn, table: RwSignal<UserTable>) -> impl IntoView {
    // 刚刚应用的方向是“下一次方向”的反向
    let indicator = move || {
        table.with(|t| match t.sort_column() {
            Some(c) if c == column => match t.sort_direction().flipped() {
                SortDirection::Ascending => " ▲",
                SortDirection::Descending => " ▼",
            },
            _ => "",
        })
    };

    view! {
        <th class="cursor-pointer select-none" on:click=move |_| table.update(|t| t.sort_by(column))>
            {column.label()}
            {indicator}
        </th>
    }
}

#[component]
fn UserRow(
    record: UserRecord,
    table: RwSignal<UserTable>,
    on_delete: Callback<UserId>,
    on_toggle: Callback<UserRecord>,
    on_add: Callback<()>,
) -> impl IntoView {
    let id = record.id.clone();
    let is_active = record.status.is_active();

    let pending = {
        let id = id.clone();
        move || table.with(|t| t.is_pending(&id))
    };
    let failure = {
        let id = id.clone();
        move || {
            table.with(|t| match t.mutation_state(&id) {
                Some(MutationState::Failed { kind, message }) => {
                    Some(format!("Failed to {}: {}", kind, message))
                }
                _ => None,
            })
        }
    };

    let dot_class = if is_active {
        "badge badge-success badge-xs"
    } else {
        "badge badge-neutral badge-xs"
    };
    let delete_id = id.clone();
    let toggle_record = record.clone();

    view! {
        <tr>
            <td>
                <div class="flex items-center gap-2">
                    {record.username.clone()}
                    {move || failure().map(|msg| view! {
                        <span class="tooltip text-warning" data-tip=msg>
                            <AlertTriangle attr:class="h-4 w-4" />
                        </span>
                    })}
                </div>
            </td>
            <td>{locale_date_string(&record.added_date, &Local)}</td>
            <td>
                <div class="flex items-center gap-2">
                    <span class=dot_class></span>
                    {if is_active { "Online" } else { "Offline" }}
                </div>
            </td>
            <td>
                <div class="flex gap-2">
                    <button
                        class="btn btn-ghost btn-sm text-error"
                        disabled=pending.clone()
                        on:click=move |_| on_delete.run(delete_id.clone())
                    >
                        <Trash2 attr:class="h-4 w-4" />
                        "Delete"
                    </button>
                    <button class="btn btn-ghost btn-sm" disabled=pending.clone() on:click=move |_| on_add.run(())>
                        <UserPlus attr:class="h-4 w-4" />
                        "Add User"
                    </button>
                    <button
                        class="btn btn-outline btn-sm"
                        disabled=pending
                        on:click=move |_| on_toggle.run(toggle_record.clone())
                    >
                        {if is_active { "Deactivate" } else { "Activate" }}
                    </button>
                </div>
            </td>
        </tr>
    }
}

#[component]
pub fn UserTablePage() -> impl IntoView {
    let services = use_services();
    let auth = use_auth();

    let table = RwSignal::new(UserTable::new());
    let loading = RwSignal::new(true);
    let (search_input, set_search_input) = signal(String::new());
    let (date_input, set_date_input) = signal(String::new());

    // 初始加载
    reload(services.clone(), auth, table, loading);

    let on_delete = Callback::new({
        let services = services.clone();
        move |id: UserId| {
            let started = table
                .try_update(|t| t.begin(&id, MutationKind::Delete))
                .unwrap_or(false);
            if !started {
                return;
            }
            let services = services.clone();
            spawn_local(async move {
                match services.directory(auth.token()).delete_user(&id).await {
                    Ok(ack) => table.update(|t| t.commit(ack)),
                    Err(e) => {
                        error!("[Users] Delete failed: {}", e);
                        table.update(|t| t.fail(&id, e.message()));
                    }
                }
            });
        }
    });

    let on_toggle = Callback::new({
        let services = services.clone();
        move |record: UserRecord| {
            let started = table
                .try_update(|t| t.begin(&record.id, MutationKind::ToggleStatus))
                .unwrap_or(false);
            if !started {
                return;
            }
            let services = services.clone();
            spawn_local(async move {
                match services.directory(auth.token()).toggle_status(&record).await {
                    Ok(ack) => table.update(|t| t.commit(ack)),
                    Err(e) => {
                        error!("[Users] Status update failed: {}", e);
                        table.update(|t| t.fail(&record.id, e.message()));
                    }
                }
            });
        }
    });

    let on_add = Callback::new({
        let services = services.clone();
        move |_: ()| {
            let services = services.clone();
            spawn_local(async move {
                match services.directory(auth.token()).add_default_user(Utc::now()).await {
                    Ok(id) => {
                        log!("[Users] Added user {}", id);
                        // 重新加载会清空过滤条件
                        set_search_input.set(String::new());
                        set_date_input.set(String::new());
                        reload(services, auth, table, loading);
                    }
                    Err(e) => error!("[Users] Add failed: {}", e),
                }
            });
        }
    });

    let on_date = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        set_date_input.set(value.clone());
        if let Some(date) = parse_date_input(&value) {
            table.update(|t| t.filter_by_date(date));
        }
    };

    let is_empty = move || table.with(|t| t.visible_users().is_empty());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex flex-col md:flex-row gap-2 p-6 pb-2">
                    <input
                        type="text"
                        placeholder="Search"
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            table.update(|t| t.search(&value));
                            set_search_input.set(value);
                        }
                        prop:value=search_input
                        class="input input-bordered w-full"
                    />
                    <input
                        type="date"
                        on:change=on_date
                        prop:value=date_input
                        class="input input-bordered"
                    />
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <SortHeader column=SortColumn::Username table=table />
                                <SortHeader column=SortColumn::AddedDate table=table />
                                <SortHeader column=SortColumn::Status table=table />
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() && is_empty()>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !loading.get() && is_empty()>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">
                                        "No users to show."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || table.with(|t| t.visible_users().to_vec())
                                key=|r| (r.id.clone(), r.status)
                                children=move |record| view! {
                                    <UserRow
                                        record=record
                                        table=table
                                        on_delete=on_delete
                                        on_toggle=on_toggle
                                        on_add=on_add
                                    />
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
