use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    common::Displayable,
    party::{Client, Supplier},
    Books,
};
use crate::errors::{EntityKind, FinanceError, Result};

/// Client and supplier records.
pub struct DirectoryService;

impl DirectoryService {
    pub fn add_client(books: &mut Books, client: Client) -> Result<Client> {
        Self::validate_name(&client.company_name)?;
        if books.client(client.id).is_some() {
            return Err(FinanceError::InvalidInput(format!(
                "client {} already exists",
                client.id
            )));
        }
        books.clients.push(client.clone());
        Ok(client)
    }

    /// Replaces the contact details of a client, keeping its quotations.
    pub fn edit_client(books: &mut Books, id: Uuid, changes: Client) -> Result<Client> {
        Self::validate_name(&changes.company_name)?;
        let client = books
            .client_mut(id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Client, id))?;
        client.company_name = changes.company_name;
        client.contact_name = changes.contact_name;
        client.contact_phone = changes.contact_phone;
        client.email = changes.email;
        client.address = changes.address;
        client.rfc = changes.rfc;
        client.notes = changes.notes;
        Ok(client.clone())
    }

    /// Removes a client with its quotations. Refused while any quotation is paid.
    pub fn remove_client(books: &mut Books, id: Uuid) -> Result<Client> {
        let index = books
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Client, id))?;
        if let Some(paid) = books.clients[index]
            .quotations
            .iter()
            .find(|q| q.payment_id.is_some())
        {
            warn!(client_id = %id, quotation_id = %paid.id, "client has paid quotations");
            return Err(FinanceError::QuotationLocked(paid.id));
        }
        let client = books.clients.remove(index);
        info!(
            client_id = %id,
            client = %client.display_label(),
            quotations = client.quotations.len(),
            "client removed"
        );
        Ok(client)
    }

    pub fn add_supplier(books: &mut Books, supplier: Supplier) -> Result<Supplier> {
        Self::validate_name(&supplier.company_name)?;
        if books.supplier(supplier.id).is_some() {
            return Err(FinanceError::InvalidInput(format!(
                "supplier {} already exists",
                supplier.id
            )));
        }
        books.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    pub fn remove_supplier(books: &mut Books, id: Uuid) -> Result<Supplier> {
        let index = books
            .suppliers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Supplier, id))?;
        let supplier = books.suppliers.remove(index);
        info!(supplier_id = %id, supplier = %supplier.display_label(), "supplier removed");
        Ok(supplier)
    }

    fn validate_name(candidate: &str) -> Result<()> {
        if candidate.trim().is_empty() {
            Err(FinanceError::InvalidInput("company name is required".into()))
        } else {
            Ok(())
        }
    }
}
