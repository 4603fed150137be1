use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_DANGER_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
};

fn data_management_view() -> Markup {
    html! {
        section id="export-section" class={ "w-full space-y-3 " (CARD_STYLE) }
        {
            h3 class="text-lg font-semibold" { "Export" }
            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                "Download all of your transactions as a JSON file you can keep as a backup."
            }

            a
                href=(endpoints::EXPORT)
                download
                class={ "block text-center " (BUTTON_SECONDARY_STYLE) }
            {
                i class="fa-solid fa-download mr-2" {}
                "Export Data"
            }
        }

        section id="import-section" class={ "w-full " (CARD_STYLE) }
        {
            form
                hx-post=(endpoints::IMPORT)
                hx-encoding="multipart/form-data"
                enctype="multipart/form-data"
                hx-target="#dialog-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="space-y-3"
            {
                h3 class="text-lg font-semibold" { "Import" }

                label for="file" class="block text-sm text-gray-500 dark:text-gray-400"
                {
                    "Restore transactions from an exported file. This replaces your current data."
                }

                input
                    id="file"
                    type="file"
                    name="file"
                    accept="application/json,.json"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                button type="submit" id="import-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    i class="fa-solid fa-upload mr-2" {}
                    "Import Data"
                }
            }
        }

        section id="danger-zone" class={ "w-full space-y-3 " (CARD_STYLE) }
        {
            h3 class="text-lg font-semibold text-rose-500" { "Danger Zone" }
            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                "Delete every transaction. You will be asked to confirm first."
            }

            button
                type="button"
                id="clear-button"
                hx-post=(endpoints::CLEAR_TRANSACTIONS)
                hx-target="#dialog-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class=(BUTTON_DANGER_STYLE)
            {
                i class="fa-solid fa-trash-can mr-2" {}
                "Clear All Data"
            }
        }
    }
}

/// Renders the settings page with the export, import and clear controls.
pub async fn get_settings_page() -> Response {
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold w-full" { "Settings" }

            (data_management_view())

            p class="text-xs text-gray-400"
            {
                "Pastel Finance v" (env!("CARGO_PKG_VERSION"))
            }
        }
    };

    base("Settings", &[], &content).into_response()
}
