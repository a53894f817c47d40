//! Product Edit Page
//!
//! Trilingual fields, price, images and a two-level group picker.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api::{ApiClient, ApiError, ParentRef};
use crate::components::{CheckboxField, EditHeader, FormError, TextAreaField, TextField};
use crate::context::use_app;
use crate::models::{Group, Product, ProductUpdate};
use crate::store::Page;

/// Where the group picker starts for a loaded product
#[derive(Debug, Clone, PartialEq)]
enum PickerStart {
    Unassigned,
    Root(String),
    /// Not a root; its parent must be fetched
    Lookup(String),
}

fn picker_start(group_id: Option<&str>, roots: &[Group]) -> PickerStart {
    match group_id.filter(|id| !id.is_empty()) {
        None => PickerStart::Unassigned,
        Some(id) if roots.iter().any(|g| g.id == id) => PickerStart::Root(id.to_string()),
        Some(id) => PickerStart::Lookup(id.to_string()),
    }
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

/// Name, MIME type and contents of the file chosen in a file input
async fn read_selected_file(ev: &web_sys::Event) -> Result<(String, String, Vec<u8>), ApiError> {
    let file = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
        .ok_or_else(|| ApiError::Invalid("no file selected".to_string()))?;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::Invalid(format!("could not read file: {:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let mime = Some(file.type_()).filter(|t| !t.is_empty());
    Ok((file.name(), mime.unwrap_or_else(|| "application/octet-stream".to_string()), bytes))
}

#[derive(Clone, Copy)]
struct ProductForm {
    name_ru: RwSignal<String>,
    name_uz: RwSignal<String>,
    name_en: RwSignal<String>,
    description_ru: RwSignal<String>,
    description_uz: RwSignal<String>,
    description_en: RwSignal<String>,
    price: RwSignal<String>,
    is_active: RwSignal<bool>,
    images: RwSignal<Vec<String>>,
    group_id: RwSignal<Option<String>>,
}

impl ProductForm {
    fn new() -> Self {
        Self {
            name_ru: RwSignal::new(String::new()),
            name_uz: RwSignal::new(String::new()),
            name_en: RwSignal::new(String::new()),
            description_ru: RwSignal::new(String::new()),
            description_uz: RwSignal::new(String::new()),
            description_en: RwSignal::new(String::new()),
            price: RwSignal::new("0".to_string()),
            is_active: RwSignal::new(true),
            images: RwSignal::new(Vec::new()),
            group_id: RwSignal::new(None),
        }
    }

    fn fill(&self, product: Product) {
        let update = ProductUpdate::from_product(&product);
        self.name_ru.set(update.name_ru);
        self.name_uz.set(update.name_uz);
        self.name_en.set(update.name_en);
        self.description_ru.set(update.description_ru);
        self.description_uz.set(update.description_uz);
        self.description_en.set(update.description_en);
        self.price.set(update.price.to_string());
        self.is_active.set(update.is_active);
        self.images.set(update.images);
        self.group_id.set(update.group_id);
    }

    fn to_update(&self) -> Result<ProductUpdate, String> {
        let price = self
            .price
            .get_untracked()
            .trim()
            .parse::<f64>()
            .map_err(|_| "Price must be a number".to_string())?;
        let update = ProductUpdate {
            name_ru: self.name_ru.get_untracked(),
            name_uz: self.name_uz.get_untracked(),
            name_en: self.name_en.get_untracked(),
            description_ru: self.description_ru.get_untracked(),
            description_uz: self.description_uz.get_untracked(),
            description_en: self.description_en.get_untracked(),
            price,
            is_active: self.is_active.get_untracked(),
            images: self.images.get_untracked(),
            group_id: self.group_id.get_untracked(),
        };
        update.validate()?;
        Ok(update)
    }
}

#[component]
pub fn ProductEditPage(id: String) -> impl IntoView {
    let ctx = use_app();
    let limit = ctx.config().fetch_limit;
    let form = ProductForm::new();
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (uploading, set_uploading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let (roots, set_roots) = signal(Vec::<Group>::new());
    let (children, set_children) = signal(Vec::<Group>::new());
    let selected_root = RwSignal::new(None::<String>);
    let (loading_children, set_loading_children) = signal(false);

    // Child level of the picker follows the selected root
    let load_children = move |root: Option<String>| {
        set_children.set(Vec::new());
        let Some(root) = root else {
            return;
        };
        set_loading_children.set(true);
        spawn_local(async move {
            let result = ctx.api().list_groups(&ParentRef::Group(root.clone()), limit).await;
            if selected_root.try_get_untracked().flatten().as_deref() != Some(root.as_str()) {
                return;
            }
            match result {
                Ok(page) => set_children.set(page.items),
                Err(e) => ctx.report(&e, "loading child groups"),
            }
            set_loading_children.set(false);
        });
    };

    let product_id = id.clone();
    Effect::new(move |_| {
        let product_id = product_id.clone();
        spawn_local(async move {
            let api = ctx.api();
            let loaded = futures::try_join!(
                api.get_product(&product_id),
                api.list_groups(&ParentRef::Root, limit),
            );
            match loaded {
                Ok((product, root_page)) => {
                    let start = picker_start(product.group_id.as_deref(), &root_page.items);
                    form.fill(product);
                    set_roots.set(root_page.items);
                    let root = resolve_root(&api, start).await;
                    selected_root.set(root.clone());
                    load_children(root);
                }
                Err(e) => {
                    ctx.report(&e, "loading product");
                    set_error.set(Some("Failed to load product".to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let on_root_change = move |ev: web_sys::Event| {
        let root = non_empty(event_target_value(&ev));
        selected_root.set(root.clone());
        form.group_id.set(root.clone());
        load_children(root);
    };

    let on_child_change = move |ev: web_sys::Event| {
        let child = non_empty(event_target_value(&ev));
        form.group_id.set(child.or_else(|| selected_root.get_untracked()));
    };

    let on_upload = move |ev: web_sys::Event| {
        if uploading.get_untracked() {
            return;
        }
        set_uploading.set(true);
        spawn_local(async move {
            let result = match read_selected_file(&ev).await {
                Ok((name, mime, bytes)) => ctx.api().upload_image(&name, &mime, bytes).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(url) => form.images.update(|images| images.push(url)),
                Err(e) => {
                    ctx.report(&e, "uploading image");
                    set_error.set(Some("Failed to upload image".to_string()));
                }
            }
            set_uploading.set(false);
        });
    };

    let save_id = id.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let update = match form.to_update() {
            Ok(update) => update,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);
        let product_id = save_id.clone();
        spawn_local(async move {
            match ctx.api().update_product(&product_id, &update).await {
                Ok(()) => {
                    log::info!("product {} saved", product_id);
                    ctx.navigate(Page::Products);
                }
                Err(e) => {
                    ctx.report(&e, "saving product");
                    set_error.set(Some(format!("Failed to update product: {}", e.user_message())));
                }
            }
            set_saving.set(false);
        });
    };

    let group_options = move |groups: Vec<Group>, selected: Option<String>| {
        groups
            .into_iter()
            .map(|g| {
                let is_selected = selected.as_deref() == Some(g.id.as_str());
                view! { <option value=g.id.clone() selected=is_selected>{g.name_ru.clone()}</option> }
            })
            .collect_view()
    };

    view! {
        <div class="page edit-page">
            <EditHeader
                title="Edit product"
                back_label="Back to products"
                on_back=move |_| ctx.navigate(Page::Products)
            />
            <FormError error=error />

            <Show when=move || !loading.get() fallback=|| view! { <div class="loading">"Loading..."</div> }>
                <form class="edit-form" on:submit=on_submit.clone()>
                    <section class="image-grid">
                        <span class="field-label">"Product images"</span>
                        <For
                            each=move || { form.images.get().into_iter().enumerate().collect::<Vec<_>>() }
                            key=|(index, url)| format!("{}:{}", index, url)
                            children=move |(index, url)| view! {
                                <div class="image-tile">
                                    <img src=url.clone() alt=format!("Product {}", index + 1) />
                                    <button
                                        type="button"
                                        class="image-remove"
                                        on:click=move |_| form.images.update(|images| {
                                            if index < images.len() {
                                                images.remove(index);
                                            }
                                        })
                                    >
                                        "🗑"
                                    </button>
                                </div>
                            }
                        />
                        <label class="image-upload">
                            {move || if uploading.get() { "Uploading..." } else { "Upload image" }}
                            <input
                                type="file"
                                accept="image/*"
                                class="hidden"
                                disabled=move || uploading.get()
                                on:change=on_upload
                            />
                        </label>
                    </section>

                    <div class="field-grid three">
                        <TextField label="Name (RU)" value=form.name_ru required=true />
                        <TextField label="Name (UZ)" value=form.name_uz required=true />
                        <TextField label="Name (EN)" value=form.name_en required=true />
                    </div>
                    <div class="field-grid three">
                        <TextAreaField label="Description (RU)" value=form.description_ru />
                        <TextAreaField label="Description (UZ)" value=form.description_uz />
                        <TextAreaField label="Description (EN)" value=form.description_en />
                    </div>

                    <div class="field-grid two">
                        <TextField label="Price ($)" value=form.price input_type="number" required=true />

                        <label class="field">
                            <span class="field-label">"Parent group"</span>
                            <select on:change=on_root_change>
                                <option value="" selected=move || selected_root.get().is_none()>"No group"</option>
                                {move || group_options(roots.get(), selected_root.get())}
                            </select>
                        </label>

                        <label class="field">
                            <span class="field-label">
                                "Child group"
                                {move || loading_children.get().then_some(" ⏳")}
                            </span>
                            <select
                                on:change=on_child_change
                                disabled=move || selected_root.get().is_none() || loading_children.get()
                            >
                                <option value="">
                                    {move || if selected_root.get().is_none() {
                                        "Select a parent group first"
                                    } else {
                                        "-- Use parent group --"
                                    }}
                                </option>
                                {move || group_options(children.get(), form.group_id.get())}
                            </select>
                            <Show when=move || {
                                selected_root.get().is_some() && !loading_children.get() && children.with(Vec::is_empty)
                            }>
                                <p class="hint">"No child groups"</p>
                            </Show>
                        </label>

                        <CheckboxField label="Active" checked=form.is_active />
                    </div>

                    <div class="form-actions">
                        <button type="button" on:click=move |_| ctx.navigate(Page::Products)>"Cancel"</button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

/// Root group to preselect; a nested group resolves to its parent
async fn resolve_root(api: &ApiClient, start: PickerStart) -> Option<String> {
    match start {
        PickerStart::Unassigned => None,
        PickerStart::Root(id) => Some(id),
        PickerStart::Lookup(id) => match api.get_group(&id).await {
            Ok(group) => group.parent_group_id,
            Err(e) => {
                log::warn!("could not resolve parent of group {}: {}", id, e);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(id: &str) -> Group {
        serde_json::from_value(serde_json::json!({
            "id": id, "name_uz": id, "name_ru": id, "name_en": id,
            "description_uz": null, "description_ru": null, "description_en": null,
            "parent_group_id": null, "is_active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_picker_start() {
        let roots = vec![root("g1"), root("g2")];
        assert_eq!(picker_start(None, &roots), PickerStart::Unassigned);
        assert_eq!(picker_start(Some(""), &roots), PickerStart::Unassigned);
        assert_eq!(picker_start(Some("g2"), &roots), PickerStart::Root("g2".to_string()));
        assert_eq!(picker_start(Some("g7"), &roots), PickerStart::Lookup("g7".to_string()));
    }
}
