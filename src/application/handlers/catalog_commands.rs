//! Catalog command handler - Types, brands and products

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::domain::commands::{Command, Context};
use crate::domain::entities::{CatalogBrand, CatalogType, Picture, Product};
use crate::domain::events::Event;

use super::{unsupported, CommandHandler, HandlerContext, HandlerError};

const MAX_NAME_LENGTH: usize = 255;
const MAX_DESCRIPTION_LENGTH: usize = 10000;

#[derive(Debug, Default)]
pub struct CatalogCommandHandler;

impl CatalogCommandHandler {
    pub fn new() -> Self {
        Self
    }

    fn validate_name(kind: &str, name: &str) -> Result<(), HandlerError> {
        if name.trim().is_empty() {
            return Err(HandlerError::rejected(format!("{} name cannot be empty", kind)));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(HandlerError::rejected(format!(
                "{} name cannot exceed {} characters",
                kind, MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }

    fn validate_price(price: f64) -> Result<(), HandlerError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(HandlerError::rejected("Product price must be greater than 0"));
        }
        Ok(())
    }
}

#[async_trait]
impl CommandHandler for CatalogCommandHandler {
    fn context(&self) -> Context {
        Context::Catalog
    }

    #[instrument(skip(self, command, ctx), fields(command_type = command.command_type()))]
    async fn handle(&self, command: &Command, ctx: &mut HandlerContext) -> Result<(), HandlerError> {
        match command {
            Command::DefineCatalogType { type_id, name } => {
                Self::validate_name("Catalog type", name)?;
                let catalog_type = CatalogType {
                    id: *type_id,
                    name: name.clone(),
                };
                ctx.uow().add(type_id, &catalog_type).await?;
                ctx.publish(Event::CatalogTypeDefined {
                    type_id: *type_id,
                    name: name.clone(),
                });
                info!("Defined catalog type {} ({})", name, type_id);
            }
            Command::DefineCatalogBrand { brand_id, name } => {
                Self::validate_name("Catalog brand", name)?;
                let brand = CatalogBrand {
                    id: *brand_id,
                    name: name.clone(),
                };
                ctx.uow().add(brand_id, &brand).await?;
                ctx.publish(Event::CatalogBrandDefined {
                    brand_id: *brand_id,
                    name: name.clone(),
                });
                info!("Defined catalog brand {} ({})", name, brand_id);
            }
            Command::AddProduct {
                product_id,
                name,
                price,
                catalog_brand_id,
                catalog_type_id,
            } => {
                Self::validate_name("Product", name)?;
                Self::validate_price(*price)?;

                // Both references must resolve
                ctx.uow().get::<CatalogType>(catalog_type_id).await?;
                ctx.uow().get::<CatalogBrand>(catalog_brand_id).await?;

                let product = Product::new(
                    *product_id,
                    name.clone(),
                    *price,
                    *catalog_type_id,
                    *catalog_brand_id,
                );
                ctx.uow().add(product_id, &product).await?;
                ctx.publish(Event::ProductAdded {
                    product_id: *product_id,
                    name: name.clone(),
                    price: *price,
                    catalog_type_id: *catalog_type_id,
                    catalog_brand_id: *catalog_brand_id,
                });
                info!("Added product {} ({})", name, product_id);
            }
            Command::SetPictureProduct {
                product_id,
                content,
                content_type,
            } => {
                if content.is_empty() {
                    return Err(HandlerError::rejected("Picture content cannot be empty"));
                }
                if !content_type.starts_with("image/") {
                    return Err(HandlerError::rejected(format!(
                        "Unsupported picture content type: {}",
                        content_type
                    )));
                }

                let product: Product = ctx.uow().get(product_id).await?;
                let product = product.with_picture(Picture {
                    content: content.clone(),
                    content_type: content_type.clone(),
                });
                ctx.uow().update(product_id, &product).await?;
                ctx.publish(Event::ProductPictureSet {
                    product_id: *product_id,
                    content_type: content_type.clone(),
                });
                debug!("Set picture for product {}", product_id);
            }
            Command::UpdateDescriptionProduct {
                product_id,
                description,
            } => {
                if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                    return Err(HandlerError::rejected(format!(
                        "Product description cannot exceed {} characters",
                        MAX_DESCRIPTION_LENGTH
                    )));
                }

                let product: Product = ctx.uow().get(product_id).await?;
                let product = product.with_description(description.clone());
                ctx.uow().update(product_id, &product).await?;
                ctx.publish(Event::ProductDescriptionUpdated {
                    product_id: *product_id,
                    description: description.clone(),
                });
                debug!("Updated description for product {}", product_id);
            }
            other => return Err(unsupported(self.context(), other)),
        }
        Ok(())
    }
}
