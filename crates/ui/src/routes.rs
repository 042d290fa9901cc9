use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{DecksView, EditorView, FlashcardsView, QuizView, RegisterView, SignInView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DecksView)] Decks {},
        #[route("/editor", EditorView)] Editor {},
        #[route("/flashcards", FlashcardsView)] Flashcards {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/sign-in", SignInView)] SignIn {},
        #[route("/register", RegisterView)] Register {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quizcards" }
            ul {
                li { Link { to: Route::Decks {}, "Decks" } }
                li { Link { to: Route::Flashcards {}, "Flashcards" } }
                li { Link { to: Route::Quiz {}, "Quiz" } }
                li { Link { to: Route::Editor {}, "Editor" } }
                li { Link { to: Route::SignIn {}, "Sign in" } }
                li { Link { to: Route::Register {}, "Register" } }
            }
        }
    }
}
