//! Domain setup - feature factories and the phased setup that runs them.

pub mod domain_factory;
pub mod domain_factory_repo;

pub use domain_factory::{
    DOMAIN_FACTORY_TYPE, DomainFactory, attach_domain_factory, register_domain_factory,
};
pub use domain_factory_repo::DomainFactoryRepo;
