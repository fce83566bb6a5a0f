//! Main application component.

use yew::prelude::*;

use crate::components::editor::{EditorToolbar, HotspotCanvas};
use crate::hooks::{KeyboardShortcutsConfig, use_keyboard_shortcuts, use_menu_state};

/// Root application component.
#[function_component(App)]
pub fn app() -> Html {
    let menu = use_menu_state();
    let image_url = use_state(|| None::<AttrValue>);

    let on_image_selected = {
        let image_url = image_url.clone();
        Callback::from(move |url: String| {
            image_url.set(Some(url.into()));
        })
    };

    use_keyboard_shortcuts(KeyboardShortcutsConfig {
        on_toggle_grid: Some(menu.on_toggle_grid.clone()),
        on_toggle_snap: Some(menu.on_toggle_snap.clone()),
        on_reset_view: Some(menu.on_reset_view.clone()),
        on_delete: Some(menu.on_delete_selected.clone()),
        enabled: true,
    });

    html! {
        <div class="app">
            <EditorToolbar
                session={menu.session.clone()}
                version={menu.version}
                on_change={menu.on_change.clone()}
                on_image_selected={on_image_selected}
                on_import={menu.on_import.clone()}
            />
            <HotspotCanvas
                session={menu.session.clone()}
                image_url={(*image_url).clone()}
                version={menu.version}
                on_change={menu.on_change.clone()}
            />
        </div>
    }
}
