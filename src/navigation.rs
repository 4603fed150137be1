//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    icon: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_desktop_html(self) -> Markup {
        let style = if self.is_current {
            "flex items-center gap-2 py-2 px-3 text-pink-600 font-semibold \
            rounded-xl bg-pink-50 dark:bg-pink-500/20 dark:text-pink-200"
        } else {
            "flex items-center gap-2 py-2 px-3 text-gray-700 rounded-xl \
            hover:bg-pink-50 hover:text-pink-600 dark:text-gray-200 \
            dark:hover:bg-gray-800 dark:hover:text-pink-200"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                i class={ "fa-solid " (self.icon) } {}
                (self.title)
            }
        )
    }

    fn into_mobile_html(self) -> Markup {
        let style = if self.is_current {
            "flex w-full min-w-0 flex-col items-center justify-center gap-1 \
            rounded-lg bg-pink-50 px-2.5 py-2 text-xs font-semibold \
            text-pink-700 dark:bg-pink-500/20 dark:text-pink-200"
        } else {
            "flex w-full min-w-0 flex-col items-center justify-center gap-1 \
            rounded-lg px-2.5 py-2 text-xs font-semibold text-gray-600 \
            hover:bg-pink-50/70 hover:text-pink-700 dark:text-gray-300 \
            dark:hover:bg-gray-800"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                i class={ "fa-solid " (self.icon) } {}
                span class="truncate" { (self.title) }
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::ROOT,
                title: "Home",
                icon: "fa-house",
                is_current: active_endpoint == endpoints::ROOT,
            },
            Link {
                url: endpoints::TRANSACTIONS_VIEW,
                title: "Transactions",
                icon: "fa-list",
                is_current: active_endpoint == endpoints::TRANSACTIONS_VIEW,
            },
            Link {
                url: endpoints::NEW_TRANSACTION_VIEW,
                title: "Add",
                icon: "fa-plus",
                is_current: active_endpoint == endpoints::NEW_TRANSACTION_VIEW,
            },
            Link {
                url: endpoints::REPORTS_VIEW,
                title: "Reports",
                icon: "fa-chart-pie",
                is_current: active_endpoint == endpoints::REPORTS_VIEW,
            },
            Link {
                url: endpoints::SETTINGS_VIEW,
                title: "Settings",
                icon: "fa-gear",
                is_current: active_endpoint == endpoints::SETTINGS_VIEW,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        let links = self.links;

        html!(
            nav class="bg-white border-b border-pink-100 dark:bg-gray-900 dark:border-gray-800"
            {
                div
                    class="max-w-screen-lg flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="flex items-center space-x-3"
                    {
                        img src="/icon.svg" alt="Pastel Finance Logo" class="h-8";

                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Pastel Finance"
                        }
                    }

                    div class="hidden w-full lg:block lg:w-auto"
                    {
                        ul class="font-medium flex flex-row space-x-2"
                        {
                            @for link in links.clone().into_iter() {
                                li { (link.into_desktop_html()) }
                            }
                        }
                    }
                }
            }

            nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden"
            {
                div class="mx-auto max-w-screen-xl px-4 pb-4"
                {
                    div
                        class="rounded-xl border border-gray-200 bg-white/95
                        shadow-lg backdrop-blur dark:border-gray-700 dark:bg-gray-900/95"
                    {
                        ul
                            class="grid grid-cols-5 gap-1 px-2 py-2"
                            aria-label="Primary"
                        {
                            @for link in links.into_iter() {
                                li class="min-w-0" { (link.into_mobile_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::ROOT, true);
        cases.insert(endpoints::TRANSACTIONS_VIEW, true);
        cases.insert(endpoints::NEW_TRANSACTION_VIEW, true);
        cases.insert(endpoints::REPORTS_VIEW, true);
        cases.insert(endpoints::SETTINGS_VIEW, true);

        cases.insert(endpoints::TRANSACTIONS_API, false);
        cases.insert(endpoints::EXPORT, false);
        cases.insert(endpoints::IMPORT, false);
        cases.insert(endpoints::SERVICE_WORKER, false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[test]
    fn marks_current_link_in_both_bars() {
        let markup = NavBar::new(endpoints::ROOT).into_html().into_string();
        let html = scraper::Html::parse_fragment(&markup);
        let selector = scraper::Selector::parse("a[aria-current='page']").unwrap();

        // One for the desktop bar and one for the mobile bar.
        assert_eq!(html.select(&selector).count(), 2);
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        let get_active_string = |is_active: bool| -> &str {
            if is_active {
                "active (true)"
            } else {
                "inactive (false)"
            }
        };

        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current,
                    should_be_active,
                    "Link for current page should be {} but got {}",
                    get_active_string(should_be_active),
                    get_active_string(link.is_current),
                )
            } else {
                assert!(
                    !link.is_current,
                    "Link for inactive page should {} but got {}",
                    get_active_string(false),
                    get_active_string(link.is_current)
                )
            }
        }
    }
}
