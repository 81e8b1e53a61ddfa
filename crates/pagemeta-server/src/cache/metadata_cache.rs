//! TTL cache of extracted page metadata.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pagemeta_core::PageMeta;
use parking_lot::RwLock;
use tracing::debug;

use crate::cache::clock::{Clock, SystemClock};
use crate::metrics::CacheMetrics;

/// Configuracion del cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL en segundos (default: 86400 = 24 horas)
    pub ttl_seconds: u64,
    /// Intervalo del sweep en segundos (default: 3600 = 1 hora)
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 86_400,
            sweep_interval_seconds: 3_600,
        }
    }
}

impl CacheConfig {
    /// Tiempo de vida de cada entry.
    pub fn default_expiration(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Periodo entre sweeps de entries expiradas.
    pub fn invalidation_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

/// Entry almacenada. Nunca sale del cache por referencia.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Arc<PageMeta>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Cache de metadata por URL con expiracion por TTL.
///
/// Thread-safe: todo acceso al mapa pasa por un `RwLock`. Las keys son las
/// URLs tal cual llegan, sin normalizar. Una entry con `expires_at <= now` ya
/// no existe para ningun lector, aunque el sweep todavia no la haya borrado.
///
/// # Examples
///
/// ```
/// use pagemeta_core::PageMeta;
/// use pagemeta_server::cache::{CacheConfig, MetadataCache};
///
/// let cache = MetadataCache::new(CacheConfig::default());
/// cache.set("https://example.com", PageMeta::default());
///
/// assert!(cache.get("https://example.com").is_some());
/// assert!(cache.get("https://example.com/").is_none());
/// ```
#[derive(Clone)]
pub struct MetadataCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    metrics: CacheMetrics,
}

impl MetadataCache {
    /// Crea un nuevo cache con el reloj del sistema.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Crea un nuevo cache con un reloj inyectado.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            config,
            clock,
            metrics: CacheMetrics::new(),
        }
    }

    /// Obtiene la metadata de una URL si existe y no expiro.
    ///
    /// Una entry expirada se borra en el acto (expiracion lazy).
    pub fn get(&self, url: &str) -> Option<Arc<PageMeta>> {
        let start = Instant::now();
        let now = self.clock.now();

        let lookup = {
            let entries = self.entries.read();
            entries
                .get(url)
                .map(|entry| (!entry.is_expired(now)).then(|| Arc::clone(&entry.value)))
        };

        let result = match lookup {
            Some(Some(value)) => Some(value),
            Some(None) => {
                self.remove_if_expired(url, now);
                None
            },
            None => None,
        };

        if result.is_some() {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }

        self.metrics
            .record_operation_duration("get", start.elapsed());

        result
    }

    /// Inserta o reemplaza la metadata de una URL.
    /// La entry expira `default_expiration` despues de ahora.
    pub fn set(&self, url: impl Into<String>, meta: impl Into<Arc<PageMeta>>) {
        let start = Instant::now();
        let entry = CacheEntry {
            value: meta.into(),
            expires_at: self.clock.now() + self.config.default_expiration(),
        };

        let replaced = {
            let mut entries = self.entries.write();
            let replaced = entries.insert(url.into(), entry).is_some();
            self.metrics.update_entry_count(entries.len() as u64);
            replaced
        };

        if replaced {
            self.metrics.record_eviction("replaced");
        }

        self.metrics
            .record_operation_duration("set", start.elapsed());
    }

    /// Borra todas las entries expiradas y retorna cuantas se borraron.
    pub fn sweep(&self) -> usize {
        let start = Instant::now();
        let now = self.clock.now();

        let (removed, remaining) = {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now));
            (before - entries.len(), entries.len())
        };

        self.metrics.record_evictions("swept", removed as u64);
        self.metrics.update_entry_count(remaining as u64);
        self.metrics
            .record_operation_duration("sweep", start.elapsed());

        debug!(removed, remaining, "Cache sweep finished");

        removed
    }

    /// Invalida una URL especifica. Retorna true si habia una entry.
    pub fn invalidate(&self, url: &str) -> bool {
        let removed = {
            let mut entries = self.entries.write();
            let removed = entries.remove(url).is_some();
            self.metrics.update_entry_count(entries.len() as u64);
            removed
        };

        if removed {
            self.metrics.record_eviction("manual");
        }

        removed
    }

    /// Invalida todas las entradas. Retorna cuantas habia.
    pub fn invalidate_all(&self) -> usize {
        let count = {
            let mut entries = self.entries.write();
            let count = entries.len();
            entries.clear();
            count
        };

        self.metrics.record_evictions("manual", count as u64);
        self.metrics.update_entry_count(0);

        count
    }

    /// Numero de entries almacenadas, incluyendo expiradas aun no barridas.
    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Retorna true si no hay entries almacenadas.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot de las keys almacenadas.
    /// Nota: las entries pueden cambiar despues de tomar la snapshot.
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Instante de expiracion de una entry almacenada.
    /// No aplica expiracion: una entry vencida aun no barrida se reporta igual.
    pub fn expires_at(&self, url: &str) -> Option<Instant> {
        self.entries.read().get(url).map(|entry| entry.expires_at)
    }

    /// Retorna la configuracion.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Borra la entry solo si sigue expirada bajo el write lock:
    /// un `set` concurrente pudo haberla reemplazado.
    fn remove_if_expired(&self, url: &str, now: Instant) {
        let mut entries = self.entries.write();
        if entries.get(url).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(url);
            self.metrics.update_entry_count(entries.len() as u64);
            drop(entries);
            self.metrics.record_eviction("expired");
        }
    }
}

impl std::fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("config", &self.config)
            .field("entries", &self.entry_count())
            .finish()
    }
}
