use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::domain::quotation::Quotation;

/// A customer. Owns its quotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: Uuid,
    #[serde(rename = "nombreEmpresa")]
    pub company_name: String,
    #[serde(rename = "nombreContacto", default)]
    pub contact_name: String,
    #[serde(rename = "telefonoContacto", default)]
    pub contact_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(default)]
    pub rfc: String,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "fechaRegistro")]
    pub registered_at: DateTime<Utc>,
    #[serde(rename = "cotizaciones", default)]
    pub quotations: Vec<Quotation>,
}

impl Client {
    pub fn new(company_name: impl Into<String>, registered_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_name: company_name.into(),
            contact_name: String::new(),
            contact_phone: String::new(),
            email: String::new(),
            address: String::new(),
            rfc: String::new(),
            notes: None,
            registered_at,
            quotations: Vec::new(),
        }
    }

    pub fn quotation(&self, id: Uuid) -> Option<&Quotation> {
        self.quotations.iter().find(|q| q.id == id)
    }

    pub fn quotation_mut(&mut self, id: Uuid) -> Option<&mut Quotation> {
        self.quotations.iter_mut().find(|q| q.id == id)
    }
}

impl Identifiable for Client {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Client {
    fn display_label(&self) -> String {
        if self.rfc.is_empty() {
            self.company_name.clone()
        } else {
            format!("{} - {}", self.company_name, self.rfc)
        }
    }
}

/// A vendor that receives expense payments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: Uuid,
    #[serde(rename = "nombreEmpresa")]
    pub company_name: String,
    #[serde(rename = "nombreContacto", default)]
    pub contact_name: String,
    #[serde(rename = "telefonoContacto", default)]
    pub contact_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(default)]
    pub rfc: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "productos", default)]
    pub products: Vec<String>,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "fechaRegistro")]
    pub registered_at: DateTime<Utc>,
}

impl Supplier {
    pub fn new(
        company_name: impl Into<String>,
        category: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_name: company_name.into(),
            contact_name: String::new(),
            contact_phone: String::new(),
            email: String::new(),
            address: String::new(),
            rfc: String::new(),
            category: category.into(),
            products: Vec::new(),
            notes: None,
            registered_at,
        }
    }
}

impl Identifiable for Supplier {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Supplier {
    fn display_label(&self) -> String {
        format!("{} ({})", self.company_name, self.category)
    }
}
