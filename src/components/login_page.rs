//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app;
use crate::models::LoginRequest;
use crate::session::Session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let credentials = LoginRequest {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if credentials.username.is_empty() || credentials.password.is_empty() {
            set_error.set(Some("Enter username and password".to_string()));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            let result = ctx.anonymous_api().login(&credentials).await.and_then(Session::admit);
            match result {
                Ok(session) => ctx.login(session),
                Err(e) => {
                    log::warn!("login as {} rejected: {}", credentials.username, e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="login-screen">
            <form class="login-card" on:submit=on_submit>
                <h1>"Heat Stand-Art"</h1>
                <p class="login-subtitle">"Sign in to the admin panel"</p>

                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}

                <label>
                    "Username"
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>

                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
