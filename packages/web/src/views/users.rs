use api::directory::{departments, RoleFilter, StatusFilter, UserFilter};
use api::models::User;
use api::DataSource;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, Spinner};
use ui::format::format_datetime;
use ui::{use_auth, use_source};

#[component]
pub fn Users() -> Element {
    let auth = use_auth();
    let source = use_source();

    let mut users = use_signal(Vec::<User>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);

    let mut search = use_signal(String::new);
    let mut department = use_signal(|| Option::<String>::None);
    let mut role = use_signal(RoleFilter::default);
    let mut status = use_signal(StatusFilter::default);

    let load_source = source.clone();
    let _loader = use_resource(move || {
        let source = load_source.clone();
        async move {
            match source.users().await {
                Ok(list) => users.set(list),
                Err(e) => {
                    tracing::error!("Failed to load users: {e}");
                    error.set(Some("ユーザー一覧の取得に失敗しました".to_string()));
                }
            }
            loading.set(false);
        }
    });

    let filtered = use_memo(move || {
        UserFilter {
            search: search(),
            department: department(),
            role: role(),
            status: status(),
        }
        .apply(&users.read())
    });
    let department_names = use_memo(move || departments(&users.read()));

    let toggle_active = use_callback(move |(id, active): (u64, bool)| {
        let source = source.clone();
        spawn(async move {
            match source.set_user_active(id, !active).await {
                Ok(updated) => {
                    if let Some(user) = users.write().iter_mut().find(|u| u.id == id) {
                        *user = updated;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to update user {id}: {e}");
                    error.set(Some("ユーザーステータスの更新に失敗しました".to_string()));
                }
            }
        });
    });

    if loading() {
        return rsx! {
            Spinner {}
        };
    }

    let is_admin = auth().user().is_some_and(|u| u.is_admin());

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "メンバー" }

            Alert { kind: AlertKind::Error, message: error() }

            div {
                class: "filter-bar",
                input {
                    class: "filter-search",
                    r#type: "search",
                    placeholder: "名前またはメールアドレスで検索",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    onchange: move |evt| {
                        let value = evt.value();
                        department.set(if value == "all" { None } else { Some(value) });
                    },
                    option { value: "all", "すべての部署" }
                    for name in department_names() {
                        option {
                            key: "{name}",
                            value: "{name}",
                            selected: department().as_deref() == Some(name.as_str()),
                            "{name}"
                        }
                    }
                }
                select {
                    onchange: move |evt| role.set(RoleFilter::parse(&evt.value())),
                    option { value: "all", "すべての役割" }
                    option { value: "admin", "管理者" }
                    option { value: "user", "一般ユーザー" }
                }
                select {
                    onchange: move |evt| status.set(StatusFilter::parse(&evt.value())),
                    option { value: "all", "すべてのステータス" }
                    option { value: "active", "アクティブ" }
                    option { value: "inactive", "非アクティブ" }
                }
            }

            table {
                class: "user-table",
                thead {
                    tr {
                        th { "ユーザー" }
                        th { "部署" }
                        th { "役割" }
                        th { "ステータス" }
                        th { "登録日" }
                        if is_admin {
                            th { "操作" }
                        }
                    }
                }
                tbody {
                    for user in filtered() {
                        tr {
                            key: "{user.id}",
                            td {
                                div { class: "user-name", "{user.name}" }
                                div { class: "user-email", "{user.email}" }
                            }
                            td { {user.department_name().unwrap_or("未所属").to_string()} }
                            td { if user.is_admin() { "管理者" } else { "一般ユーザー" } }
                            td {
                                span {
                                    class: if user.active { "status active" } else { "status inactive" },
                                    if user.active { "アクティブ" } else { "非アクティブ" }
                                }
                            }
                            td { "{format_datetime(user.created_at)}" }
                            if is_admin {
                                td {
                                    button {
                                        class: "btn btn-small",
                                        onclick: {
                                            let (id, active) = (user.id, user.active);
                                            move |_| toggle_active.call((id, active))
                                        },
                                        if user.active { "無効化" } else { "有効化" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if filtered.read().is_empty() {
                p { class: "empty", "条件に一致するユーザーはいません" }
            }
        }
    }
}
