//! Editor toolbar: file operations, grid and view controls, menu
//! metadata fields.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::file::callbacks::FileReader;
use tapmap_core::{EditorSession, MAX_CHAT_BAR_TEXT_LEN, MenuSize, export_json};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement, Url};
use yew::prelude::*;

#[derive(Properties)]
pub struct EditorToolbarProps {
    pub session: Rc<RefCell<EditorSession>>,
    /// Session change counter; re-renders the toolbar's readouts.
    pub version: u32,
    pub on_change: Callback<()>,
    /// Object URL of a newly chosen background image.
    pub on_image_selected: Callback<String>,
    /// JSON text of a document picked for import.
    pub on_import: Callback<String>,
}

impl PartialEq for EditorToolbarProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
            && self.version == other.version
            && self.on_change == other.on_change
            && self.on_image_selected == other.on_image_selected
            && self.on_import == other.on_import
    }
}

/// Offers `json` as a file download named `filename`.
fn download_json(json: &str, filename: &str) {
    let blob_options = web_sys::BlobPropertyBag::new();
    blob_options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(
        &js_sys::Array::of1(&json.into()),
        &blob_options,
    )
    .ok();

    if let Some(blob) = blob {
        if let Ok(url) = Url::create_object_url_with_blob(&blob) {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Ok(a) = document.create_element("a") {
                    let _ = a.set_attribute("href", &url);
                    let _ = a.set_attribute("download", filename);
                    if let Some(a) = a.dyn_ref::<web_sys::HtmlElement>() {
                        a.click();
                    }
                    let _ = Url::revoke_object_url(&url);
                }
            }
        }
    }
}

#[function_component(EditorToolbar)]
pub fn editor_toolbar(props: &EditorToolbarProps) -> Html {
    let file_reader = use_state(|| None::<FileReader>);
    let image_input_ref = use_node_ref();
    let import_input_ref = use_node_ref();

    let (show_grid, snap_enabled, zoom_locked, grid_size, zoom, menu_size, meta, area_count) = {
        let session = props.session.borrow();
        let view = session.view();
        (
            view.show_grid,
            view.grid_snap_enabled,
            view.zoom_locked,
            view.grid_size,
            view.zoom,
            session.menu_size(),
            session.meta().clone(),
            session.store().len(),
        )
    };

    let on_image_click = {
        let image_input_ref = image_input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = image_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_image_change = {
        let on_image_selected = props.on_image_selected.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                match Url::create_object_url_with_blob(&file) {
                    Ok(url) => on_image_selected.emit(url),
                    Err(err) => tracing::error!("object url failed: {err:?}"),
                }
            }
            input.set_value("");
        })
    };

    let on_import_click = {
        let import_input_ref = import_input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = import_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_import_change = {
        let on_import = props.on_import.clone();
        let file_reader = file_reader.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(files) = input.files() {
                if let Some(file) = files.get(0) {
                    let on_import = on_import.clone();
                    let file_reader_setter = file_reader.clone();
                    let reader = gloo::file::callbacks::read_as_text(&file.into(), move |result| {
                        if let Ok(text) = result {
                            on_import.emit(text);
                        }
                        file_reader_setter.set(None);
                    });
                    file_reader.set(Some(reader));
                }
            }
            input.set_value("");
        })
    };

    let on_export_click = {
        let session = props.session.clone();
        Callback::from(move |_: MouseEvent| match export_json(&session.borrow()) {
            Ok(json) => download_json(&json, "menu.json"),
            Err(err) => {
                tracing::warn!("export blocked: {err}");
                let _ = web_sys::window()
                    .and_then(|w| w.alert_with_message(&format!("Export failed: {err}")).ok());
            }
        })
    };

    let on_toggle_grid = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            session.borrow_mut().toggle_grid();
            on_change.emit(());
        })
    };

    let on_toggle_snap = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            session.borrow_mut().toggle_snap();
            on_change.emit(());
        })
    };

    let on_toggle_zoom_lock = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            session.borrow_mut().set_zoom_locked(input.checked());
            on_change.emit(());
        })
    };

    let on_reset_view = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            session.borrow_mut().reset_view();
            on_change.emit(());
        })
    };

    let on_grid_size_change = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(size) = select.value().parse::<u32>() {
                session.borrow_mut().set_grid_size(size);
                on_change.emit(());
            }
        })
    };

    let on_menu_size_change = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let menu_size = match select.value().as_str() {
                "half" => MenuSize::Half,
                _ => MenuSize::Full,
            };
            if let Err(err) = session.borrow_mut().set_menu_size(menu_size) {
                tracing::error!("menu size change failed: {err}");
            }
            on_change.emit(());
        })
    };

    let on_name_input = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            session.borrow_mut().meta_mut().name = input.value();
            on_change.emit(());
        })
    };

    let on_chat_bar_input = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            session.borrow_mut().meta_mut().chat_bar_text = input.value();
            on_change.emit(());
        })
    };

    let on_selected_change = {
        let session = props.session.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            session.borrow_mut().meta_mut().selected = input.checked();
            on_change.emit(());
        })
    };

    html! {
        <div class="editor-toolbar">
            <div class="editor-toolbar-group">
                <button onclick={on_image_click} title="Load background image">{"Image"}</button>
                <input
                    ref={image_input_ref}
                    type="file"
                    accept="image/*"
                    style="display: none;"
                    onchange={on_image_change}
                />
                <button onclick={on_import_click} title="Import JSON">{"Import"}</button>
                <input
                    ref={import_input_ref}
                    type="file"
                    accept=".json,application/json"
                    style="display: none;"
                    onchange={on_import_change}
                />
                <button onclick={on_export_click} title="Export JSON">{"Export"}</button>
            </div>

            <div class="editor-toolbar-group">
                <label>
                    {"Name"}
                    <input type="text" value={meta.name.clone()} oninput={on_name_input} />
                </label>
                <label>
                    {"Chat bar"}
                    <input
                        type="text"
                        value={meta.chat_bar_text.clone()}
                        maxlength={MAX_CHAT_BAR_TEXT_LEN.to_string()}
                        oninput={on_chat_bar_input}
                    />
                </label>
                <label>
                    <input
                        type="checkbox"
                        checked={meta.selected}
                        onchange={on_selected_change}
                    />
                    {"Default"}
                </label>
                <label>
                    {"Size"}
                    <select onchange={on_menu_size_change}>
                        <option value="full" selected={menu_size == MenuSize::Full}>{"2500 x 1686"}</option>
                        <option value="half" selected={menu_size == MenuSize::Half}>{"2500 x 843"}</option>
                    </select>
                </label>
            </div>

            <div class="editor-toolbar-group">
                <button
                    class={classes!(show_grid.then_some("active"))}
                    onclick={on_toggle_grid}
                    title="Toggle grid (g)"
                >
                    {"Grid"}
                </button>
                <button
                    class={classes!(snap_enabled.then_some("active"))}
                    onclick={on_toggle_snap}
                    title="Toggle snapping (s)"
                >
                    {"Snap"}
                </button>
                <label>
                    {"Grid size"}
                    <select onchange={on_grid_size_change}>
                        { for [10u32, 25, 50, 100].into_iter().map(|size| html! {
                            <option value={size.to_string()} selected={size == grid_size}>
                                {size.to_string()}
                            </option>
                        }) }
                    </select>
                </label>
                <label>
                    <input
                        type="checkbox"
                        checked={zoom_locked}
                        onchange={on_toggle_zoom_lock}
                    />
                    {"Lock zoom"}
                </label>
                <button onclick={on_reset_view} title="Reset view (0)">{"Reset view"}</button>
            </div>

            <div class="editor-toolbar-info">
                <span>{format!("{area_count} areas")}</span>
                <span>{format!("{:.0}%", zoom * 100.0)}</span>
            </div>
        </div>
    }
}
