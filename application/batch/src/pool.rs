use rayon::prelude::*;

/// Thread pool that runs one independent job per item.
pub struct WorkerPool {
  pool: rayon::ThreadPool,
}

impl WorkerPool {
  pub fn new(
    name: &'static str,
    num_threads: Option<usize>,
  ) -> Result<Self, rayon::ThreadPoolBuildError> {
    let pool = rayon::ThreadPoolBuilder::new()
      .thread_name(move |i| format!("{}-{}", name, i))
      .num_threads(
        num_threads.unwrap_or(
          std::thread::available_parallelism()
            .map(usize::from)
            .unwrap_or(1),
        ),
      )
      .build()?;

    Ok(Self { pool })
  }

  pub fn thread_count(&self) -> usize {
    self.pool.current_num_threads()
  }

  /// Run `f` for every item inside the pool, the results keep the item order.
  pub fn map_each<T, R>(&self, items: &[T], f: impl Fn(&T) -> R + Sync + Send) -> Vec<R>
  where
    T: Sync,
    R: Send,
  {
    self.pool.install(|| items.par_iter().map(f).collect())
  }
}

#[test]
fn map_keeps_order() {
  let pool = WorkerPool::new("test-pool", Some(3)).unwrap();
  assert_eq!(pool.thread_count(), 3);
  let items: Vec<usize> = (0..100).collect();
  let result = pool.map_each(&items, |v| v * 2);
  assert_eq!(result, items.iter().map(|v| v * 2).collect::<Vec<_>>());
}
