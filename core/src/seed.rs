// quinta/src/seed.rs

//! Data a fresh installation starts with.

use crate::error::QuintaResult;
use crate::models::{Permission, Product, Role, User};
use crate::users::hash_password;
use chrono::NaiveDate;

pub fn default_products() -> Vec<Product> {
  vec![
    Product {
      id: 1,
      name: "Incubadora Digital Automática".to_string(),
      description: "Capacidade para 54 ovos com controle de umidade e viragem automática.".to_string(),
      price_cents: 85_000_000,
      cost_price_cents: 59_500_000,
      category: "Incubação".to_string(),
      image: "https://images.unsplash.com/photo-1594488358434-738980327f1c?q=80&w=400&h=400&fit=crop".to_string(),
      rating: 4.9,
      stock: 10,
    },
    Product {
      id: 2,
      name: "Ração Postura Premium 20kg".to_string(),
      description: "Balanceada com cálcio e proteínas para máxima produtividade de ovos.".to_string(),
      price_cents: 11_500_000,
      cost_price_cents: 8_050_000,
      category: "Rações".to_string(),
      image: "https://images.unsplash.com/photo-1516467508483-a7212febe31a?q=80&w=400&h=400&fit=crop".to_string(),
      rating: 4.8,
      stock: 25,
    },
    Product {
      id: 3,
      name: "Bebedouro Automático Nipple".to_string(),
      description: "Kit com 10 unidades. Evita desperdício e mantém a água sempre limpa.".to_string(),
      price_cents: 8_900_000,
      cost_price_cents: 6_230_000,
      category: "Equipamentos".to_string(),
      image: "https://images.unsplash.com/photo-1589923188900-85dae523342b?q=80&w=400&h=400&fit=crop".to_string(),
      rating: 4.7,
      stock: 15,
    },
    Product {
      id: 4,
      name: "Suplemento Vitamínico Fortalecedor".to_string(),
      description: "Complexo A, D3 e E para crescimento saudável de pintinhos.".to_string(),
      price_cents: 4_500_000,
      cost_price_cents: 3_150_000,
      category: "Saúde".to_string(),
      image: "https://images.unsplash.com/photo-1584308666744-24d5c474f2ae?q=80&w=400&h=400&fit=crop".to_string(),
      rating: 4.6,
      stock: 40,
    },
  ]
}

pub fn default_product_categories() -> Vec<String> {
  ["Rações", "Equipamentos", "Incubação", "Saúde", "Acessórios"]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn default_staff_categories() -> Vec<String> {
  ["Administração", "Produção", "Vendas", "Logística"]
    .into_iter()
    .map(String::from)
    .collect()
}

/// The built-in administrator, `admin` / `123`. Operators are expected to
/// change the password after the first start.
pub fn default_users() -> QuintaResult<Vec<User>> {
  Ok(vec![User {
    id: 1,
    username: "admin".to_string(),
    password_hash: hash_password("123")?,
    role: Role::Admin,
    category: None,
    display_name: "Administrador Principal".to_string(),
    created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
    permissions: Permission::ALL.to_vec(),
  }])
}
