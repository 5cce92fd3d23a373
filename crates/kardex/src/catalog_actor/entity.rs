use super::error::CatalogError;
use super::{CatalogAction, CatalogActionResult};
use crate::model::{CatalogCreate, CatalogId, CatalogKind, CatalogRecord, CatalogUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use std::marker::PhantomData;

fn required(field: &str, value: String) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl<K: CatalogKind> ActorEntity for CatalogRecord<K> {
    type Id = CatalogId;
    type Create = CatalogCreate;
    type Update = CatalogUpdate;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: CatalogId, params: CatalogCreate) -> Result<Self, CatalogError> {
        Ok(Self {
            id,
            code: required("code", params.code)?,
            name: required("name", params.name)?,
            attributes: params.attributes,
            active: true,
            created_at: Utc::now(),
            kind: PhantomData,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    fn entity_type() -> &'static str {
        K::NAME
    }

    async fn on_update(&mut self, update: CatalogUpdate, _ctx: &()) -> Result<(), CatalogError> {
        if let Some(code) = update.code {
            self.code = required("code", code)?;
        }
        if let Some(name) = update.name {
            self.name = required("name", name)?;
        }
        for (key, value) in update.attributes {
            if value.is_empty() {
                self.attributes.remove(&key);
            } else {
                self.attributes.insert(key, value);
            }
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CatalogAction,
        _ctx: &(),
    ) -> Result<CatalogActionResult, CatalogError> {
        match action {
            CatalogAction::SetActive(active) => {
                let previous = std::mem::replace(&mut self.active, active);
                Ok(CatalogActionResult::SetActive(previous))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Brand, Supplier};

    #[test]
    fn entity_type_names_the_collection() {
        assert_eq!(Supplier::entity_type(), "Supplier");
        assert_eq!(Brand::entity_type(), "Brand");
    }

    #[tokio::test]
    async fn update_merges_attributes() {
        let mut supplier = Supplier::from_create_params(
            CatalogId(1),
            CatalogCreate::new(" F001 ", "Ferragens Silva")
                .with_attribute("cnpj", "12.345.678/0001-90")
                .with_attribute("phone", "11 5555-0000"),
        )
        .unwrap();
        assert_eq!(supplier.code, "F001");

        let mut update = CatalogUpdate::default();
        update.attributes.insert("phone".into(), String::new());
        update.attributes.insert("email".into(), "vendas@silva.com.br".into());
        supplier.on_update(update, &()).await.unwrap();

        assert!(!supplier.attributes.contains_key("phone"));
        assert_eq!(supplier.attributes["email"], "vendas@silva.com.br");
        assert_eq!(supplier.attributes.len(), 2);
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = Brand::from_create_params(CatalogId(1), CatalogCreate::new("B1", "  "));
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }
}
