//! 터미널 출력 포맷팅 유틸리티
//!
//! 조립 루트가 컴포넌트를 연결하는 동안 진행 상황을 보여줍니다.
//!
//! ```text
//! ╔══════════════════════════════════════════════════╗
//! ║              Stash Backend Container             ║
//! ╚══════════════════════════════════════════════════╝
//! → Step 1: Repositories
//!    ├─ UserRepository: ready
//! ✓ Step 1: Repositories (4 items)
//! ```

/// 박스 형태로 둘러싸인 제목을 출력합니다 (50칸, 중앙 정렬)
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 조립 완료 요약
pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 APPLICATION CONTAINER READY");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}
