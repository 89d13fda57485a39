//! Leptos application: add-product form plus table and card views.

use leptos::*;
use storefront_core::Field;

use crate::api::{DEFAULT_API_URL, HttpProductApi, ProductApi};
use crate::catalog::ProductCatalog;
use crate::form::{FormController, SubmitOutcome};
use crate::frontend::file;
use crate::render;
use crate::types::ViewState;

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let api = HttpProductApi::new(DEFAULT_API_URL);
    let form = create_rw_signal(FormController::new());
    let catalog = create_rw_signal(ProductCatalog::new());

    // Initial load, once on mount.
    catalog.update(ProductCatalog::begin_load);
    let load_api = api.clone();
    spawn_local(async move {
        let result = load_api.list_products().await;
        catalog.update(|catalog| {
            let _ = catalog.finish_load(result);
        });
    });

    view! {
        <div class="app">
            <AddProductForm form=form catalog=catalog api=api/>
            <main>
                <h2>"Products"</h2>
                <ProductTable catalog=catalog/>
                <ProductCards catalog=catalog/>
            </main>
        </div>
    }
}

/// Add-product form component.
#[component]
fn AddProductForm(
    form: RwSignal<FormController>,
    catalog: RwSignal<ProductCatalog>,
    api: HttpProductApi,
) -> impl IntoView {
    let field_value = move |field: Field| move || form.with(|f| f.draft().get(field).to_string());
    let on_field = move |field: Field| {
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            form.update(|f| f.update_field(field, value));
        }
    };

    let on_image = move |ev: ev::Event| {
        let Some(selected) = file::selected_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match file::encode_browser_file(&selected).await {
                Ok(image) => form.update(|f| f.set_image(image)),
                Err(err) => form.update(|f| f.image_failed(&err)),
            }
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let Some(pending) = form.try_update(|f| f.begin_submit().ok()).flatten() else {
            return;
        };

        let api = api.clone();
        spawn_local(async move {
            let result = api.create_product(pending.request()).await;
            let outcome = form.try_update(|f| f.finish_submit(pending, result));
            if let Some(SubmitOutcome::Created(product)) = outcome {
                catalog.update(|catalog| catalog.ingest(product));
            }
        });
    };

    view! {
        <div class="add-product-container">
            <h2>"Add New Product"</h2>

            <form class="add-product-form" on:submit=on_submit>
                <label>"Title"</label>
                <input name="title" prop:value=field_value(Field::Title) on:input=on_field(Field::Title)/>

                <label>"Price"</label>
                <input
                    name="price"
                    type="number"
                    prop:value=field_value(Field::Price)
                    on:input=on_field(Field::Price)
                />

                <label>"Description"</label>
                <textarea
                    name="description"
                    prop:value=field_value(Field::Description)
                    on:input=on_field(Field::Description)
                ></textarea>

                <label>"Category"</label>
                <input
                    name="category"
                    prop:value=field_value(Field::Category)
                    on:input=on_field(Field::Category)
                />

                <label>"Image"</label>
                <input type="file" accept="image/*" on:change=on_image/>

                {move || {
                    form.with(|f| f.preview().map(str::to_string))
                        .map(|src| view! { <img src=src alt="preview" width="200"/> })
                }}

                {move || {
                    form.with(|f| f.error_message().map(str::to_string))
                        .map(|message| view! { <p style="color: red">{message}</p> })
                }}
                {move || {
                    form.with(|f| f.success_message().map(str::to_string))
                        .map(|message| view! { <p style="color: green">{message}</p> })
                }}

                <button type="submit" disabled=move || form.with(|f| !f.can_submit())>
                    {move || {
                        if form.with(FormController::is_submitting) { "Submitting..." } else { "Add Product" }
                    }}
                </button>
            </form>
        </div>
    }
}

/// Table view of the catalog.
#[component]
fn ProductTable(catalog: RwSignal<ProductCatalog>) -> impl IntoView {
    move || {
        catalog.with(|catalog| match catalog.view() {
            ViewState::Loading => view! { <p>{render::LOADING_MESSAGE}</p> }.into_view(),
            ViewState::Empty => view! { <p>{render::EMPTY_MESSAGE}</p> }.into_view(),
            ViewState::Ready(products) => {
                let rows = render::table_rows(products);
                view! {
                    <table class="product-table">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Image"</th>
                                <th>"Title"</th>
                                <th>"Category"</th>
                                <th>"Price"</th>
                                <th>"Rating"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows.into_iter().map(|row| {
                                let alt = row.title.clone();
                                let image = row.image.map(|src| view! { <img src=src alt=alt width="50"/> });
                                view! {
                                    <tr>
                                        <td>{row.id}</td>
                                        <td>{image}</td>
                                        <td>{row.title}</td>
                                        <td>{row.category}</td>
                                        <td>"$"{row.price}</td>
                                        <td>{row.rating}</td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }
                .into_view()
            }
        })
    }
}

/// Card grid view of the catalog.
#[component]
fn ProductCards(catalog: RwSignal<ProductCatalog>) -> impl IntoView {
    move || {
        catalog.with(|catalog| match catalog.view() {
            ViewState::Loading => view! { <p>{render::LOADING_MESSAGE}</p> }.into_view(),
            ViewState::Empty => view! { <p>{render::EMPTY_MESSAGE}</p> }.into_view(),
            ViewState::Ready(products) => {
                let cards = render::cards(products);
                view! {
                    <div class="product-grid">
                        {cards.into_iter().map(|card| {
                            let alt = card.title.clone();
                            let image = card.image.map(|src| view! { <img src=src alt=alt/> });
                            view! {
                                <div class="product-card">
                                    {image}
                                    <h3>{card.title}</h3>
                                    <p class="category">{card.category}</p>
                                    <p class="price">"$"{card.price}</p>
                                    <p class="rating">"Rating: "{card.rating}</p>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }
                .into_view()
            }
        })
    }
}
