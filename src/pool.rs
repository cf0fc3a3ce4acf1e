//! Several gateways behind one API.

use std::net::Ipv4Addr;

use futures::future::join_all;
use log::debug;

use crate::call::{Call, Reply};
use crate::config::ControllerConfig;
use crate::controller::Controller;
use crate::errors::Error;
use crate::transport::{Transport, UdpTransport};

type Result<T> = std::result::Result<T, Error>;

/// An ordered set of controllers, one per gateway, addressed by index.
///
/// There is no load balancing or failover; a call goes to exactly the
/// controller it names.
///
/// # Example
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use milight_rs::ControllerPool;
///
/// # async fn run() -> Result<(), milight_rs::Error> {
/// let pool = ControllerPool::new(&[Ipv4Addr::new(192, 168, 1, 6), Ipv4Addr::new(192, 168, 1, 7)]);
/// pool.execute(0, "set_color", &["red", "1"]).await?;
/// pool.execute(1, "on", &[]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ControllerPool<T = UdpTransport> {
    controllers: Vec<Controller<T>>,
}

impl ControllerPool<UdpTransport> {
    /// One default-configured controller per gateway, in order.
    pub fn new(gateways: &[Ipv4Addr]) -> Self {
        ControllerPool {
            controllers: gateways.iter().map(|ip| Controller::new(*ip)).collect(),
        }
    }

    /// One controller per gateway, all sharing `config`.
    pub fn with_config(gateways: &[Ipv4Addr], config: &ControllerConfig) -> Result<Self> {
        let controllers = gateways
            .iter()
            .map(|ip| Controller::with_config(*ip, config.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(ControllerPool { controllers })
    }
}

impl<T: Transport> ControllerPool<T> {
    pub fn from_controllers(controllers: Vec<Controller<T>>) -> Self {
        ControllerPool { controllers }
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn controllers(&self) -> &[Controller<T>] {
        &self.controllers
    }

    /// The controller at `index`.
    pub fn controller(&self, index: usize) -> Result<&Controller<T>> {
        self.controllers.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.controllers.len(),
        })
    }

    /// Call the operation named `operation` on the controller at `index`.
    ///
    /// Arguments are parsed as described in [`Call::parse`].
    pub async fn execute(&self, index: usize, operation: &str, args: &[&str]) -> Result<Reply> {
        let controller = self.controller(index)?;
        let call = Call::parse(operation, args)?;
        debug!("pool[{index}] {operation} {args:?}");
        controller.call(call).await
    }

    /// Run a typed call on the controller at `index`.
    pub async fn execute_call(&self, index: usize, call: Call) -> Result<Reply> {
        self.controller(index)?.call(call).await
    }

    /// Run the same call on every controller concurrently.
    ///
    /// Each gateway keeps its own pacing. Replies come back in pool order;
    /// if any controller fails, the error of the lowest index is returned.
    pub async fn execute_all(&self, call: Call) -> Result<Vec<Reply>> {
        join_all(
            self.controllers
                .iter()
                .map(|controller| controller.call(call.clone())),
        )
            .await
            .into_iter()
            .collect()
    }
}
