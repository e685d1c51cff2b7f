//! Site footer with contact links.

use leptos::prelude::*;

use crate::config::PORTFOLIO;

#[component]
pub fn SiteFooter() -> impl IntoView {
    let mailto = format!("mailto:{}", PORTFOLIO.email);
    let tel = format!("tel:{}", PORTFOLIO.phone);

    view! {
        <footer class="footer">
            <div class="footer__name">{PORTFOLIO.name}</div>
            <div class="footer__contacts">
                <a class="footer__link" href=mailto>{PORTFOLIO.email}</a>
                <a class="footer__link" href=tel>{PORTFOLIO.phone}</a>
            </div>
            <div class="footer__role">{PORTFOLIO.role}</div>
        </footer>
    }
}
