//! The decisions dashboard: list and create decisions, then manage the
//! rated options of the selected one. Every mutation re-fetches.

use api::{ApiError, Decision, DecisionOption, NewDecision, NewOption, OptionPatch, Rating};
use dioxus::prelude::*;

use crate::activity_log::{log_activity, report_error, use_activity_log, ActivityLog, LogLevel};
use crate::auth::{use_api, use_session, ApiHandle, LogoutButton};
use crate::board::DecisionBoard;

/// Everything a row needs to talk to the server and update the board.
#[derive(Clone, Copy, PartialEq)]
struct BoardCtx {
    api: ApiHandle,
    board: Signal<DecisionBoard>,
    log: Signal<ActivityLog>,
}

impl BoardCtx {
    fn fail(mut self, err: &ApiError, fallback: &str) {
        let message = report_error(&mut self.log, err, fallback);
        self.board.write().fail(message);
    }

    fn succeed(mut self, message: &str) {
        self.board.write().clear_error();
        log_activity(&mut self.log, LogLevel::Success, message);
    }

    async fn reload(mut self) {
        match self.api.client().list_decisions().await {
            Ok(decisions) => {
                tracing::debug!("Loaded {} decisions", decisions.len());
                self.board.write().set_decisions(decisions);
            }
            Err(e) => self.fail(&e, "Failed to load decisions"),
        }
    }

    async fn open(mut self, id: String) {
        let client = self.api.client();
        let loaded = async {
            let decision = client.get_decision(&id).await?;
            let options = client.list_options(&id).await?;
            Ok::<_, ApiError>((decision, options))
        }
        .await;
        match loaded {
            Ok((decision, options)) => {
                let mut board = self.board.write();
                board.select(decision, options);
                board.clear_error();
            }
            Err(e) => self.fail(&e, "Failed to load decision details"),
        }
    }

    async fn reopen_selected(self) {
        let selected = self.board.peek().selected_id().map(str::to_owned);
        if let Some(id) = selected {
            self.open(id).await;
        }
    }

    async fn create(self, draft: NewDecision) -> bool {
        match self.api.client().create_decision(&draft).await {
            Ok(decision) => {
                self.succeed(&format!("Created \"{}\"", decision.title));
                self.reload().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to create decision");
                false
            }
        }
    }

    async fn delete(mut self, id: String) {
        match self.api.client().delete_decision(&id).await {
            Ok(()) => {
                self.board.write().decision_deleted(&id);
                self.succeed("Decision deleted");
                self.reload().await;
            }
            Err(e) => self.fail(&e, "Failed to delete decision"),
        }
    }

    async fn add_option(self, draft: NewOption) -> bool {
        match self.api.client().create_option(&draft).await {
            Ok(option) => {
                self.succeed(&format!("Added option \"{}\"", option.option_text));
                self.reopen_selected().await;
                self.reload().await;
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to add option");
                false
            }
        }
    }

    async fn update_option(mut self, id: String, patch: OptionPatch) {
        match self.api.client().update_option(&id, &patch).await {
            Ok(_) => {
                self.board.write().cancel_edit();
                self.succeed("Option updated");
                self.reopen_selected().await;
            }
            Err(e) => self.fail(&e, "Failed to update option"),
        }
    }

    async fn delete_option(self, id: String) {
        match self.api.client().delete_option(&id).await {
            Ok(()) => {
                self.succeed("Option deleted");
                self.reopen_selected().await;
                self.reload().await;
            }
            Err(e) => self.fail(&e, "Failed to delete option"),
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let state = use_session();
    let board = use_signal(DecisionBoard::default);
    let ctx = BoardCtx {
        api: use_api(),
        board,
        log: use_activity_log(),
    };
    let mut loading = use_signal(|| true);
    let mut show_create = use_signal(|| false);

    let _loader = use_resource(move || async move {
        ctx.reload().await;
        loading.set(false);
    });

    let snapshot = board();
    let email = state
        .session
        .as_ref()
        .map(|s| s.email().to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "dashboard-container",
            header {
                class: "dashboard-header",
                div {
                    h1 { "Your decisions" }
                    p { class: "user-email", "{email}" }
                }
                LogoutButton { class: "btn-logout" }
            }

            if let Some(message) = snapshot.error.clone() {
                div { class: "error-message", "{message}" }
            }

            div {
                class: "dashboard-content",
                div {
                    class: "decisions-panel",
                    div {
                        class: "panel-header",
                        h2 { "Decisions" }
                        button {
                            class: "btn-primary",
                            onclick: move |_| show_create.set(!show_create()),
                            if show_create() { "Cancel" } else { "+ New decision" }
                        }
                    }
                    if show_create() {
                        NewDecisionForm {
                            ctx: ctx,
                            on_created: move |_| show_create.set(false),
                        }
                    }
                    if loading() {
                        p { class: "loading", "Loading decisions..." }
                    } else if snapshot.decisions.is_empty() {
                        p { class: "empty-state", "No decisions yet. Create one to get started." }
                    } else {
                        div {
                            class: "decisions-list",
                            for decision in snapshot.decisions.clone() {
                                DecisionRow {
                                    key: "{decision.id}",
                                    ctx: ctx,
                                    decision: decision,
                                }
                            }
                        }
                    }
                }
                div {
                    class: "details-panel",
                    if let Some(decision) = snapshot.selected.clone() {
                        DecisionDetails { ctx: ctx, decision: decision }
                    } else {
                        p { class: "empty-state-large", "Select a decision to manage its options." }
                    }
                }
            }
        }
    }
}

#[component]
fn NewDecisionForm(ctx: BoardCtx, on_created: EventHandler<()>) -> Element {
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = NewDecision::new(title(), description());
        if let Err(e) = draft.validate() {
            ctx.fail(&e, "Failed to create decision");
            return;
        }
        spawn(async move {
            saving.set(true);
            let created = ctx.create(draft).await;
            saving.set(false);
            if created {
                title.set(String::new());
                description.set(String::new());
                on_created.call(());
            }
        });
    };

    rsx! {
        form {
            class: "create-form",
            onsubmit: handle_submit,
            input {
                r#type: "text",
                placeholder: "Decision title",
                value: title(),
                oninput: move |evt: FormEvent| title.set(evt.value()),
            }
            textarea {
                placeholder: "Description (optional)",
                rows: "3",
                value: description(),
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
            button {
                r#type: "submit",
                class: "btn-primary",
                disabled: saving(),
                "Create decision"
            }
        }
    }
}

#[component]
fn DecisionRow(ctx: BoardCtx, decision: Decision) -> Element {
    let active = ctx.board.read().is_selected(&decision.id);
    let mut confirming = use_signal(|| false);
    let option_count = decision.options.len();
    let open_id = decision.id.clone();
    let delete_id = decision.id.clone();

    rsx! {
        div {
            class: if active { "decision-item active" } else { "decision-item" },
            onclick: move |_| {
                spawn(ctx.open(open_id.clone()));
            },
            div {
                class: "decision-info",
                h3 { "{decision.title}" }
                p { class: "decision-meta", "{option_count} options" }
            }
            button {
                class: "btn-delete",
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    if !confirming() {
                        confirming.set(true);
                        return;
                    }
                    confirming.set(false);
                    spawn(ctx.delete(delete_id.clone()));
                },
                if confirming() { "Really delete?" } else { "Delete" }
            }
        }
    }
}

#[component]
fn DecisionDetails(ctx: BoardCtx, decision: Decision) -> Element {
    let mut board = ctx.board;
    let adding = board.read().adding_option;
    let options = board.read().options.clone();

    rsx! {
        div {
            class: "details-header",
            h2 { "{decision.title}" }
            if let Some(description) = decision.description.clone() {
                p { class: "decision-description", "{description}" }
            }
        }
        div {
            class: "options-section",
            div {
                class: "options-header",
                h3 { "Options" }
                button {
                    class: "btn-secondary",
                    onclick: move |_| board.write().toggle_add_option(),
                    if adding { "Cancel" } else { "+ Add option" }
                }
            }
            if adding {
                NewOptionForm { ctx: ctx, decision_id: decision.id.clone() }
            }
            if options.is_empty() {
                p { class: "empty-state", "No options yet." }
            } else {
                div {
                    class: "options-list",
                    for option in options {
                        OptionRow { key: "{option.id}", ctx: ctx, option: option }
                    }
                }
            }
        }
    }
}

#[component]
fn NewOptionForm(ctx: BoardCtx, decision_id: String) -> Element {
    let mut text = use_signal(String::new);
    let mut rating = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = match Rating::parse_input(&rating()) {
            Ok(parsed) => NewOption {
                decision_id: decision_id.clone(),
                option_text: text(),
                rating: parsed,
            },
            Err(e) => {
                ctx.fail(&e, "Failed to add option");
                return;
            }
        };
        if let Err(e) = draft.validate() {
            ctx.fail(&e, "Failed to add option");
            return;
        }
        spawn(async move {
            if ctx.add_option(draft).await {
                text.set(String::new());
                rating.set(String::new());
            }
        });
    };

    rsx! {
        form {
            class: "option-form",
            onsubmit: handle_submit,
            input {
                r#type: "text",
                placeholder: "Option",
                value: text(),
                oninput: move |evt: FormEvent| text.set(evt.value()),
            }
            input {
                r#type: "number",
                min: "{RATING_MIN}",
                max: "{RATING_MAX}",
                placeholder: "Rating (1-5)",
                value: rating(),
                oninput: move |evt: FormEvent| rating.set(evt.value()),
            }
            button { r#type: "submit", class: "btn-primary", "Add" }
        }
    }
}

const RATING_MIN: u8 = Rating::MIN;
const RATING_MAX: u8 = Rating::MAX;

fn rating_input(rating: Option<Rating>) -> String {
    rating.map(|r| r.get().to_string()).unwrap_or_default()
}

#[component]
fn OptionRow(ctx: BoardCtx, option: DecisionOption) -> Element {
    let mut board = ctx.board;
    let editing = board.read().is_editing(&option.id);
    let mut text = use_signal(|| option.option_text.clone());
    let mut rating = use_signal(|| rating_input(option.rating));

    let current = option.clone();
    let start_edit = move |_| {
        text.set(current.option_text.clone());
        rating.set(rating_input(current.rating));
        board.write().start_edit(&current.id);
    };

    let save_id = option.id.clone();
    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let patch = match Rating::parse_input(&rating()) {
            Ok(parsed) => OptionPatch {
                option_text: text(),
                rating: parsed,
            },
            Err(e) => {
                ctx.fail(&e, "Failed to update option");
                return;
            }
        };
        if let Err(e) = patch.validate() {
            ctx.fail(&e, "Failed to update option");
            return;
        }
        spawn(ctx.update_option(save_id.clone(), patch));
    };

    let delete_id = option.id.clone();

    if editing {
        return rsx! {
            form {
                class: "option-item editing",
                onsubmit: handle_save,
                input {
                    r#type: "text",
                    value: text(),
                    oninput: move |evt: FormEvent| text.set(evt.value()),
                }
                input {
                    r#type: "number",
                    min: "{RATING_MIN}",
                    max: "{RATING_MAX}",
                    value: rating(),
                    oninput: move |evt: FormEvent| rating.set(evt.value()),
                }
                button { r#type: "submit", class: "btn-primary", "Save" }
                button {
                    r#type: "button",
                    class: "btn-secondary",
                    onclick: move |_| board.write().cancel_edit(),
                    "Cancel"
                }
            }
        };
    }

    rsx! {
        div {
            class: "option-item",
            span { class: "option-text", "{option.option_text}" }
            if let Some(score) = option.rating {
                span { class: "rating-badge", "{score}" }
            }
            div {
                class: "option-actions",
                button { class: "btn-edit", onclick: start_edit, "Edit" }
                button {
                    class: "btn-delete",
                    onclick: move |_| {
                        spawn(ctx.delete_option(delete_id.clone()));
                    },
                    "Delete"
                }
            }
        }
    }
}
