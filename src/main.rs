mod actor_framework;
mod app_system;
mod category_actor;
mod clients;
mod config;
mod domain;
mod order_actor;
mod pagination;
mod product_actor;
mod user_actor;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod test_factory;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, CatalogSystem};
use crate::config::CatalogConfig;
use crate::domain::{CategoryDTO, ProductDTO, UserDTO, UserInsertDTO, UserPatch};
use crate::pagination::PageRequest;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CatalogConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting catalog service");

    let system = CatalogSystem::new(&config);

    let span = tracing::info_span!("seeding");
    let (electronics, computers) = async {
        info!("Seeding categories");
        let categories = &system.category_client;
        categories.insert(CategoryDTO::new(0, "Books")).await?;
        let electronics = categories.insert(CategoryDTO::new(0, "Electronics")).await?;
        let computers = categories.insert(CategoryDTO::new(0, "Computers")).await?;
        Ok::<_, category_actor::CategoryError>((electronics, computers))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let categories = system.category_client.find_all().await.map_err(|e| e.to_string())?;
    info!(count = categories.len(), "Categories available");
    let first = system.category_client.find_by_id(1).await.map_err(|e| e.to_string())?;
    info!(category_name = %first.name, "First category");

    let span = tracing::info_span!("product_crud");
    async {
        let products = &system.product_client;

        let tv = products
            .insert(product("Smart TV", Decimal::new(219000, 2), vec![electronics.clone()]))
            .await?;
        let macbook = products
            .insert(product(
                "Macbook Pro",
                Decimal::new(125000, 2),
                vec![electronics.clone(), computers.clone()],
            ))
            .await?;
        info!(tv_id = tv.id, macbook_id = macbook.id, "Products created");

        let page = products
            .find_all_paged(&[computers.id], "", PageRequest::of(0, 10))
            .await?;
        if page.is_empty() {
            warn!("No computers listed");
        }
        info!(total = page.total_elements, "Computers listed");

        let mut changes = tv.clone();
        changes.price = Decimal::new(199000, 2);
        let tv = products.update(tv.id, changes).await?;
        info!(price = %tv.price, "Smart TV repriced");

        if let Err(e) = products.find_by_id(999).await {
            warn!(error = %e, "Lookup of unknown product failed as expected");
        }
        Ok::<_, product_actor::ProductError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("order_processing");
    async {
        let order_id = system
            .order_client
            .place_order(1, 2)
            .await
            .map_err(|e| e.to_string())?;
        info!(order_id, "Order placed");

        // The ordered product is pinned by the order
        match system.product_client.delete(1).await {
            Ok(()) => error!("Ordered product was deleted"),
            Err(e) => info!(error = %e, "Delete refused while the order exists"),
        }

        system
            .order_client
            .cancel_order(order_id)
            .await
            .map_err(|e| e.to_string())?;
        system.product_client.delete(1).await.map_err(|e| e.to_string())?;
        info!("Product deleted after the order was cancelled");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("user_registration");
    async {
        let alice = UserInsertDTO {
            user: UserDTO {
                id: 0,
                first_name: "Alice".to_string(),
                last_name: "Brown".to_string(),
                email: "alice@example.com".to_string(),
            },
            password: "123456".to_string(),
        };
        let user = system.user_client.insert(alice.clone()).await.map_err(|e| e.to_string())?;
        info!(user_id = user.id, "User registered");

        let patch = UserPatch { first_name: Some("Alicia".to_string()), last_name: None };
        let user = system.user_client.update(user.id, patch).await.map_err(|e| e.to_string())?;
        info!(user_name = %user.first_name, "User renamed");

        match system.user_client.insert(alice).await {
            Ok(_) => error!("Duplicate e-mail was accepted"),
            Err(e) => info!(error = %e, "Duplicate e-mail rejected"),
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

fn product(name: &str, price: Decimal, categories: Vec<CategoryDTO>) -> ProductDTO {
    ProductDTO {
        id: 0,
        name: name.to_string(),
        description: format!("{name} from the demo catalog"),
        price,
        img_url: format!("https://img.example.com/{}.png", name.to_lowercase().replace(' ', "-")),
        date: Utc::now(),
        categories,
    }
}
