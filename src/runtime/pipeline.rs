//! fetch → locate → project → render

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::map::{MapGrid, MarkerCell, project};
use crate::render::Renderer;
use crate::services::{ExternalIpSource, FixedIp, GeoIpLookup, GeoIpProvider, GeoLocation, HttpIpResolver};

/// Result of one resolution cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub ip: String,
    pub location: GeoLocation,
    pub cell: MarkerCell,
}

pub struct Pipeline {
    source: Box<dyn ExternalIpSource>,
    geoip: Box<dyn GeoIpLookup>,
    grid: MapGrid,
    renderer: Renderer,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn ExternalIpSource>,
        geoip: Box<dyn GeoIpLookup>,
        grid: MapGrid,
        renderer: Renderer,
    ) -> Self {
        Self {
            source,
            geoip,
            grid,
            renderer,
        }
    }

    /// Wire up the real services from configuration
    pub fn from_config(config: &AppConfig, styled: bool) -> Result<Self> {
        let source: Box<dyn ExternalIpSource> = match config.network.fixed_ip {
            Some(ref ip) => Box::new(FixedIp(ip.clone())),
            None => Box::new(HttpIpResolver::new(
                &config.network.ip_endpoint,
                config.network.timeout(),
            )),
        };
        let geoip = GeoIpProvider::new(&config.geoip);

        let grid = config.map_source().load()?;
        debug!("Map template: {}x{}", grid.width(), grid.height());

        let mut renderer = Renderer::new(&config.display, styled);
        if config.watch.enabled {
            renderer = renderer.with_interval(config.watch.interval_secs);
        }

        info!(
            "IP source: {}, GeoIP provider: {}",
            source.name(),
            geoip.provider_name()
        );
        Ok(Self::new(source, Box::new(geoip), grid, renderer))
    }

    pub fn grid(&self) -> &MapGrid {
        &self.grid
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Fetch the external IP only
    pub fn fetch_ip(&self) -> Result<String> {
        self.source.fetch()
    }

    /// Geolocate `ip` and project it onto the grid
    pub fn locate_ip(&self, ip: String) -> Result<Snapshot> {
        let location = self.geoip.lookup(&ip)?;
        let cell = project(location.coordinate, &self.grid);
        debug!(
            "{} located at {} ({}) -> row {}, column {}",
            ip,
            location.coordinate,
            location.place_label(),
            cell.row,
            cell.column
        );
        Ok(Snapshot { ip, location, cell })
    }

    /// One full resolution cycle
    pub fn locate(&self) -> Result<Snapshot> {
        let ip = self.fetch_ip()?;
        self.locate_ip(ip)
    }

    pub fn render(&self, snapshot: &Snapshot) -> String {
        self.renderer
            .frame(&self.grid, snapshot.cell, &snapshot.ip, &snapshot.location)
    }
}

/// Scripted services shared by the runtime tests
#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::errors::{MapIpError, Result};
    use crate::services::{ExternalIpSource, GeoIpLookup, GeoLocation};

    /// Returns queued answers in order, then fails with a network error
    pub struct ScriptedIps(RefCell<VecDeque<Result<String>>>);

    impl ScriptedIps {
        pub fn new(answers: Vec<Result<String>>) -> Self {
            Self(RefCell::new(answers.into()))
        }
    }

    impl ExternalIpSource for ScriptedIps {
        fn fetch(&self) -> Result<String> {
            self.0
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(MapIpError::network("script exhausted")))
        }

        fn name(&self) -> &'static str {
            "Scripted"
        }
    }

    pub struct StaticGeo(pub Vec<(&'static str, GeoLocation)>);

    impl GeoIpLookup for StaticGeo {
        fn lookup(&self, ip: &str) -> Result<GeoLocation> {
            self.0
                .iter()
                .find(|(known, _)| *known == ip)
                .map(|(_, loc)| loc.clone())
                .ok_or_else(|| MapIpError::lookup(format!("no record for {}", ip)))
        }

        fn name(&self) -> &'static str {
            "Static"
        }
    }
}
