//! Dashboard sidebar: identity block, tab navigation, logout.

use dioxus::prelude::*;

use api::UserProfile;

use crate::auth::LogoutButton;

/// The dashboard's tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardTab {
    Overview,
    Notes,
    Create,
    Categories,
    Favorites,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 5] = [
        DashboardTab::Overview,
        DashboardTab::Notes,
        DashboardTab::Create,
        DashboardTab::Categories,
        DashboardTab::Favorites,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Notes => "All Notes",
            DashboardTab::Create => "Create Note",
            DashboardTab::Categories => "Categories",
            DashboardTab::Favorites => "Favorites",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DashboardTab::Overview => "📊",
            DashboardTab::Notes => "📝",
            DashboardTab::Create => "➕",
            DashboardTab::Categories => "📁",
            DashboardTab::Favorites => "⭐",
        }
    }
}

#[component]
pub fn DashboardSidebar(
    user: Option<UserProfile>,
    active_tab: DashboardTab,
    on_select: EventHandler<DashboardTab>,
    on_profile: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "sidebar",

            div {
                class: "sidebar-header",
                div {
                    class: "logo",
                    span { class: "logo-icon", "📝" }
                    span { "Notably" }
                }
            }

            div {
                class: "user-profile",
                onclick: move |_| on_profile.call(()),
                if let Some(ref u) = user {
                    if let Some(ref image) = u.profile_image {
                        img {
                            class: "user-avatar",
                            src: "{image}",
                            alt: "Avatar",
                        }
                    } else {
                        div { class: "user-avatar", "{u.initials()}" }
                    }
                    div {
                        class: "user-info",
                        div { class: "user-name", "{u.display_name()}" }
                        div { class: "user-email", "{u.email}" }
                    }
                } else {
                    div { class: "user-avatar", "?" }
                }
            }

            nav {
                class: "sidebar-nav",
                for tab in DashboardTab::ALL {
                    button {
                        key: "{tab.label()}",
                        class: if tab == active_tab { "nav-item active" } else { "nav-item" },
                        onclick: move |_| on_select.call(tab),
                        span { class: "nav-icon", "{tab.icon()}" }
                        span { class: "nav-label", "{tab.label()}" }
                    }
                }
            }

            div {
                class: "sidebar-footer",
                LogoutButton {}
            }
        }
    }
}
