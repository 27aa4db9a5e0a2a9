//! Domain models

pub mod cart;
pub mod order;
pub mod payment;
pub mod product;
pub mod role;

pub use cart::{AddToCartRequest, Cart, CartLine, CartSummary, CartTotals, UpdateCartItemRequest};
pub use order::{
    CheckoutItem, CheckoutRequest, Order, OrderDetail, OrderItem, OrderPage, OrderStatus,
    UpdateOrderStatusRequest,
};
pub use payment::{PaymentMethod, PaymentNotification, PaymentSession};
pub use product::{Product, ProductCreate};
pub use role::Role;
