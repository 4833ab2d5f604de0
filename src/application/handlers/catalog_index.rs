//! Catalog index projection - Type, brand and product lists

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::events::Event;
use crate::domain::read_models::{CatalogBrandIndex, CatalogProductIndex, CatalogTypeIndex};

use super::{EventHandler, HandlerContext, HandlerError};

#[derive(Debug, Default)]
pub struct CatalogIndexHandler;

impl CatalogIndexHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for CatalogIndexHandler {
    fn name(&self) -> &'static str {
        "catalog.index"
    }

    #[instrument(skip(self, event, ctx), fields(event_type = event.event_type()))]
    async fn handle(&self, event: &Event, ctx: &mut HandlerContext) -> Result<(), HandlerError> {
        match event {
            Event::CatalogTypeDefined { type_id, name } => {
                let model = CatalogTypeIndex {
                    id: *type_id,
                    name: name.clone(),
                };
                ctx.uow().add(type_id, &model).await?;
            }
            Event::CatalogBrandDefined { brand_id, name } => {
                let model = CatalogBrandIndex {
                    id: *brand_id,
                    name: name.clone(),
                };
                ctx.uow().add(brand_id, &model).await?;
            }
            Event::ProductAdded {
                product_id,
                name,
                price,
                catalog_type_id,
                catalog_brand_id,
            } => {
                let catalog_type: CatalogTypeIndex = ctx.uow().get(catalog_type_id).await?;
                let catalog_brand: CatalogBrandIndex = ctx.uow().get(catalog_brand_id).await?;
                let model = CatalogProductIndex {
                    id: *product_id,
                    name: name.clone(),
                    price: *price,
                    catalog_type_id: *catalog_type_id,
                    catalog_type: catalog_type.name,
                    catalog_brand_id: *catalog_brand_id,
                    catalog_brand: catalog_brand.name,
                    description: None,
                    has_picture: false,
                };
                ctx.uow().add(product_id, &model).await?;
            }
            Event::ProductPictureSet { product_id, .. } => {
                let mut model: CatalogProductIndex = ctx.uow().get(product_id).await?;
                model.has_picture = true;
                ctx.uow().update(product_id, &model).await?;
            }
            Event::ProductDescriptionUpdated {
                product_id,
                description,
            } => {
                let mut model: CatalogProductIndex = ctx.uow().get(product_id).await?;
                model.description = Some(description.clone());
                ctx.uow().update(product_id, &model).await?;
            }
            _ => {}
        }
        Ok(())
    }
}
