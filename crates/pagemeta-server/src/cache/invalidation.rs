//! Cache invalidation with pattern matching support.

use glob::Pattern;
use tracing::{debug, info};

use crate::cache::MetadataCache;

impl MetadataCache {
    /// Invalida una URL exacta. Retorna cuantas entries se borraron (0 o 1).
    ///
    /// # Examples
    ///
    /// ```
    /// # use pagemeta_server::cache::{CacheConfig, MetadataCache};
    /// # let cache = MetadataCache::new(CacheConfig::default());
    /// assert_eq!(cache.invalidate_url("https://example.com"), 0);
    /// ```
    pub fn invalidate_url(&self, url: &str) -> usize {
        let count = usize::from(self.invalidate(url));

        info!(url = %url, count = count, "Cache entry invalidated");

        count
    }

    /// Invalida entradas usando un patrón glob sobre la URL.
    /// Retorna cuantas entries se borraron.
    ///
    /// - `*`: coincide con cualquier secuencia de caracteres
    /// - `?`: coincide con un carácter
    /// - `[...]`: coincide con uno de los caracteres indicados
    ///
    /// Un patrón inválido no invalida nada.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pagemeta_server::cache::{CacheConfig, MetadataCache};
    /// # let cache = MetadataCache::new(CacheConfig::default());
    /// // Invalida todas las páginas de un host
    /// let count = cache.invalidate_by_pattern("https://example.com/*");
    ///
    /// // Invalida todo lo servido por http plano
    /// let count = cache.invalidate_by_pattern("http://*");
    /// ```
    pub fn invalidate_by_pattern(&self, pattern_str: &str) -> usize {
        let pattern = match Pattern::new(pattern_str) {
            Ok(p) => p,
            Err(e) => {
                debug!(pattern = %pattern_str, error = %e, "Invalid glob pattern");
                return 0;
            },
        };

        // Recolectar primero: no se puede borrar mientras se itera la snapshot
        let matching: Vec<String> = self
            .keys()
            .into_iter()
            .filter(|key| pattern.matches(key))
            .collect();

        let count = matching
            .iter()
            .filter(|key| self.invalidate(key))
            .count();

        info!(
            pattern = %pattern_str,
            count = count,
            "Cache entries invalidated by pattern"
        );

        count
    }
}
