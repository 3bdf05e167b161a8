pub mod case;
pub mod category;
pub mod contact;
pub mod crud;
pub mod developer;
pub mod discussion;
