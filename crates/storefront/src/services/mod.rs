//! External-facing services: file storage and the Zoho Inventory mirror.

pub mod uploads;
pub mod zoho;
