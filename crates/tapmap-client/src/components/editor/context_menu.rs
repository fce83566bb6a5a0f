//! Context menu component for the hotspot canvas.

use tapmap_core::HotspotId;
use yew::prelude::*;

/// Context menu state.
#[derive(Clone, PartialEq, Default)]
pub struct ContextMenuState {
    /// Whether the menu is visible.
    pub visible: bool,
    /// Client position for menu display.
    pub client_pos: (f64, f64),
    /// Hotspot the menu acts on.
    pub target: Option<HotspotId>,
}

impl ContextMenuState {
    /// Create a new hidden context menu state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show context menu at the given position.
    pub fn show(client_pos: (f64, f64), target: HotspotId) -> Self {
        Self {
            visible: true,
            client_pos,
            target: Some(target),
        }
    }

    /// Hide context menu.
    pub fn hide() -> Self {
        Self::default()
    }
}

#[derive(Properties, PartialEq)]
pub struct ContextMenuProps {
    pub state: ContextMenuState,
    pub on_close: Callback<()>,
    /// Re-enters a drag on the target hotspot.
    pub on_move: Callback<HotspotId>,
    pub on_delete: Callback<HotspotId>,
}

#[function_component(ContextMenu)]
pub fn context_menu(props: &ContextMenuProps) -> Html {
    // Close menu when clicking outside
    let on_close = props.on_close.clone();
    let onmousedown_overlay = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        e.stop_propagation();
        on_close.emit(());
    });

    // Prevent event propagation on menu click
    let onmousedown_menu = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let onclick_move = {
        let on_move = props.on_move.clone();
        let on_close = props.on_close.clone();
        let target = props.state.target;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(id) = target {
                on_move.emit(id);
            }
            on_close.emit(());
        })
    };

    let onclick_delete = {
        let on_delete = props.on_delete.clone();
        let on_close = props.on_close.clone();
        let target = props.state.target;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(id) = target {
                on_delete.emit(id);
            }
            on_close.emit(());
        })
    };

    if !props.state.visible {
        return html! {};
    }

    let style = format!(
        "left: {}px; top: {}px;",
        props.state.client_pos.0, props.state.client_pos.1
    );

    html! {
        <div class="context-menu-overlay" onmousedown={onmousedown_overlay}>
            <div class="context-menu" {style} onmousedown={onmousedown_menu}>
                <div class="context-menu-item" onclick={onclick_move}>
                    <span>{"Move"}</span>
                </div>
                <div class="context-menu-divider" />
                <div class="context-menu-item context-menu-item-danger" onclick={onclick_delete}>
                    <span>{"Delete"}</span>
                </div>
            </div>
        </div>
    }
}
