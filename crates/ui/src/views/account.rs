//! Sign-in and registration forms. Both post through the credential
//! encryptor, so passwords never leave the client in plain text.

use std::collections::BTreeMap;

use dioxus::prelude::*;
use quizcards_core::page::{
    CSRF_FIELD, CsrfToken, PageElement, elements_by_label, is_hidden, set_visible,
};
use services::CredentialsError;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState};

/// Form action of the sign-in page, relative to the server root.
pub const SIGN_IN_ACTION: &str = "login";

/// Form action of the registration page, relative to the server root.
pub const REGISTER_ACTION: &str = "register";

const FIELD_LABEL: &str = "field";
const CAPTION_ATTR: &str = "data-caption";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountForm {
    SignIn,
    Register,
}

impl AccountForm {
    #[must_use]
    pub fn action(self) -> &'static str {
        match self {
            AccountForm::SignIn => SIGN_IN_ACTION,
            AccountForm::Register => REGISTER_ACTION,
        }
    }

    fn title(self) -> &'static str {
        match self {
            AccountForm::SignIn => "Sign in",
            AccountForm::Register => "Create account",
        }
    }

    /// `(name, input type, caption)` of every visible field.
    fn fields(self) -> &'static [(&'static str, &'static str, &'static str)] {
        match self {
            AccountForm::SignIn => &[
                ("username", "text", "Username"),
                ("password", "password", "Password"),
            ],
            AccountForm::Register => &[
                ("username", "text", "Username"),
                ("email", "email", "Email"),
                ("password1", "password", "Password"),
                ("password2", "password", "Confirm password"),
            ],
        }
    }

    fn unavailable(self) -> &'static str {
        match self {
            AccountForm::SignIn => "Sign-in is unavailable: no password cipher is configured.",
            AccountForm::Register => {
                "Registration is unavailable: no password cipher is configured."
            }
        }
    }

    fn rejected(self) -> &'static str {
        match self {
            AccountForm::SignIn => "Wrong username or password.",
            AccountForm::Register => "Registration was not accepted. Please check your details.",
        }
    }

    fn accepted(self, landed_on: &str) -> String {
        match self {
            AccountForm::SignIn => format!("Signed in. Continue at {landed_on}."),
            AccountForm::Register => "Registration successful! You can sign in now.".to_string(),
        }
    }
}

/// The form as it is posted: action, CSRF field and the typed values.
#[must_use]
pub fn build_account_form(
    kind: AccountForm,
    csrf: Option<&CsrfToken>,
    values: &BTreeMap<String, String>,
) -> PageElement {
    let mut form = PageElement::new("form")
        .with_attr("id", "sensitive")
        .with_attr("action", kind.action());
    if let Some(token) = csrf {
        form = form.with_child(PageElement::input("hidden", CSRF_FIELD, token.as_str()));
    }
    for (name, input_type, caption) in kind.fields() {
        let value = values.get(*name).cloned().unwrap_or_default();
        form = form.with_child(
            PageElement::input(input_type, name, value)
                .with_label(FIELD_LABEL)
                .with_attr(CAPTION_ATTR, *caption),
        );
    }
    form
}

#[derive(Clone, Debug, PartialEq)]
struct FieldVm {
    name: String,
    input_type: String,
    caption: String,
    value: String,
}

fn field_vms(form: &PageElement) -> Vec<FieldVm> {
    elements_by_label(form, FIELD_LABEL)
        .into_iter()
        .map(|input| FieldVm {
            name: input.name().unwrap_or_default().to_string(),
            input_type: input.attr("type").unwrap_or("text").to_string(),
            caption: input.attr(CAPTION_ATTR).unwrap_or_default().to_string(),
            value: input.value().to_string(),
        })
        .collect()
}

fn clear_passwords(kind: AccountForm, values: &mut BTreeMap<String, String>) {
    for (name, input_type, _) in kind.fields() {
        if *input_type == "password" {
            values.remove(*name);
        }
    }
}

#[component]
pub fn SignInView() -> Element {
    rsx! { CredentialForm { kind: AccountForm::SignIn } }
}

#[component]
pub fn RegisterView() -> Element {
    rsx! { CredentialForm { kind: AccountForm::Register } }
}

#[component]
fn CredentialForm(kind: AccountForm) -> Element {
    let ctx = use_context::<AppContext>();
    let encryptor = ctx.credentials();
    let csrf = ctx.config().csrf_token.clone();
    let mut values = use_signal(BTreeMap::<String, String>::new);
    let mut status = use_signal(|| ViewState::<String>::Idle);

    let form = build_account_form(kind, csrf.as_ref(), &values.read());
    let fields = field_vms(&form);

    let mut notice = PageElement::new("p").with_class("text-muted");
    set_visible(&mut notice, encryptor.is_none());
    let blocked = !is_hidden(&notice);
    let notice_class = notice.classes.to_string();
    let busy = status() == ViewState::Loading;

    let on_submit = move |_| {
        let Some(encryptor) = encryptor.clone() else {
            return;
        };
        let mut form = form.clone();
        spawn(async move {
            status.set(ViewState::Loading);
            let result = encryptor.submit(&mut form).await;
            clear_passwords(kind, &mut values.write());
            match result {
                Ok(landed_on) => {
                    debug!(%landed_on, action = kind.action(), "form accepted");
                    status.set(ViewState::Ready(kind.accepted(landed_on.as_str())));
                }
                Err(CredentialsError::Rejected(landed_on)) => {
                    debug!(%landed_on, action = kind.action(), "form rejected");
                    status.set(ViewState::Error(ViewError::Rejected(
                        kind.rejected().to_string(),
                    )));
                }
                Err(err) => {
                    warn!(error = %err, action = kind.action(), "credential form failed");
                    status.set(ViewState::Error(ViewError::from(&err)));
                }
            }
        });
    };

    rsx! {
        div { class: "page account",
            h2 { "{kind.title()}" }
            p { class: "{notice_class}", "{kind.unavailable()}" }
            div { id: "sensitive", class: "form",
                for field in fields {
                    label { key: "label-{field.name}", r#for: "{field.name}", "{field.caption}" }
                    input {
                        key: "{field.name}",
                        id: "{field.name}",
                        name: "{field.name}",
                        r#type: "{field.input_type}",
                        value: "{field.value}",
                        oninput: {
                            let name = field.name.clone();
                            move |evt: FormEvent| {
                                values.write().insert(name.clone(), evt.value());
                            }
                        },
                    }
                }
                button {
                    class: "btn btn-primary",
                    disabled: blocked || busy,
                    onclick: on_submit,
                    "{kind.title()}"
                }
            }
            match status() {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Sending..." }
                },
                ViewState::Ready(message) => rsx! {
                    p { class: "success", "{message}" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}
