//! Theoretical background.
//!
//! # Contents
//! - [Tridiagonal elimination](#tridiagonal-elimination)
//! - [Boundary rows](#boundary-rows)
//! - [Diffusion](#diffusion)
//! - [Boundary-value problems](#boundary-value-problems)
//! - [Inverse iteration](#inverse-iteration)
//! - [Time dependence](#time-dependence)
//!
//! # Tridiagonal elimination
//! Every problem handled by this crate is a second-order differential equation
//! in one spatial dimension. On a uniform grid
//! ```text
//! x[i] = x₀ + i h, i ∊ {0, ..., n}
//! ```
//! the second derivative is replaced by the three-point difference
//! ```text
//!          y[i - 1] - 2 y[i] + y[i + 1]
//! y''[i] ≈ ----------------------------  + O(h²)
//!                       h²
//! ```
//! so that each grid point couples only to its two neighbors and the discrete
//! problem becomes a linear system with a tridiagonal matrix,
//! ```text
//! a[i] y[i - 1] + b[i] y[i] + c[i] y[i + 1] = d[i]
//! ```
//! Such systems are solved in *O*(*n*) operations by Gaussian elimination
//! specialized to the band, known as the Thomas algorithm or, in the Russian
//! literature, *progonka* ("sweep")[^1]. The forward sweep removes the
//! sub-diagonal row by row,
//! ```text
//! w = a[i] / b[i - 1]
//! b[i] ← b[i] - w c[i - 1]
//! d[i] ← d[i] - w d[i - 1]
//! ```
//! after which the back sweep recovers the solution from the bottom up,
//! ```text
//! y[n] = d[n] / b[n]
//! y[i] = (d[i] - c[i] y[i + 1]) / b[i]
//! ```
//! No pivoting is performed. This is stable when the matrix is diagonally
//! dominant (|*b*| ≥ |*a*| + |*c*| in every row, strictly in at least one),
//! which holds for the implicit diffusion operator and for the Hamiltonian
//! shifted below its spectrum. The elimination is equally valid over the
//! complex numbers, which is what the time-dependent Schrödinger propagator
//! needs.
//!
//! # Boundary rows
//! The first and last rows of the system are not difference equations but
//! boundary conditions. A fixed value (Dirichlet) is the row `y[0] = v`; a fixed
//! derivative (Neumann) is the one-sided difference
//! ```text
//! y[1] - y[0]
//! ----------- = g
//!      h
//! ```
//! which is only first-order accurate. For a boundary-value problem
//! `y'' + p y' + q y = f` the error can be raised to second order by
//! expanding one more term,
//! ```text
//! y[1] = y[0] + h y'[0] + h²/2 y''[0] + O(h³)
//! ```
//! and eliminating `y''[0]` through the equation itself. This amounts to
//! adding `h/2 q[0]` to the diagonal and `h/2 (f[0] - p[0] g)` to the
//! right-hand side of the first row (and the mirror image, with signs flipped,
//! on the last row).
//!
//! If neither end fixes a value, `y + const` solves the problem as well as `y`
//! and the elimination meets a zero pivot in the final row.
//!
//! # Diffusion
//! For the diffusion equation
//! ```text
//! ∂p     ∂²p
//! -- = D --- + f(x, t)
//! ∂t     ∂x²
//! ```
//! the θ-weighted scheme with `r = D τ / h²` reads
//! ```text
//! -θ r p[i - 1, m] + (1 + 2θ r) p[i, m] - θ r p[i + 1, m]
//!     = p[i, m - 1] + (1 - θ) r (p[i - 1, m - 1] - 2 p[i, m - 1] + p[i + 1, m - 1])
//!       + τ ((1 - θ) f[i, m - 1] + θ f[i, m])
//! ```
//! With θ = ½ this is the Crank-Nicolson scheme[^2], second order in both *τ*
//! and *h* and unconditionally stable, though its amplification factor tends
//! to -1 for the stiffest modes, which then decay only slowly and with
//! alternating sign. With θ = 1 it is the fully implicit scheme, only first
//! order in *τ* but strongly damping. The operator on the left is diagonally
//! dominant for every `r > 0`.
//!
//! # Boundary-value problems
//! The classical statement of the sweep for `y'' = f` with `y(x₀) = a` and
//! `y'(xₙ) = b` writes the solution as a recursion
//! ```text
//! y[i] = α[i] y[i + 1] + β[i]
//!
//! α[i] = 1 / (2 - α[i - 1])
//! β[i] = (β[i - 1] - h² f[i]) / (2 - α[i - 1])
//! ```
//! started from the boundary value and closed by the derivative condition.
//! The α and β coefficients are exactly the normalized super-diagonal and
//! right-hand side produced by the forward sweep above, so the two forms are
//! the same computation; this crate uses the general kernel throughout.
//!
//! # Inverse iteration
//! The discretized Hamiltonian (ħ = *m* = 1)
//! ```text
//!              1 y[i - 1] - 2 y[i] + y[i + 1]
//! (H y)[i] = - - ---------------------------- + V[i] y[i]
//!              2              h²
//! ```
//! is a real symmetric tridiagonal matrix. Repeatedly solving
//! ```text
//! (H - σ) d[k + 1] = d[k]
//! ```
//! multiplies the component of `d` along each eigenvector `ψ` by
//! `1 / (E - σ)`, so that the iterate is dominated by the eigenvector whose
//! eigenvalue lies nearest the shift *σ*[^3]. The eigenvalue follows from the
//! growth of the iterate,
//! ```text
//!          ‖d[k]‖
//! E ≈ σ ± ---------
//!         ‖d[k + 1]‖
//! ```
//! the sign being that of `⟨d[k], d[k + 1]⟩`. Convergence is geometric with
//! ratio `|E₀ - σ| / |E₁ - σ|` for the two eigenvalues nearest *σ*.
//!
//! Further eigenpairs are found by deflation: after every solve, the
//! components along all previously accepted eigenvectors are removed,
//! ```text
//! d ← d - Σₖ ψₖ ⟨d, ψₖ⟩ / ⟨ψₖ, ψₖ⟩
//! ```
//! (modified Gram-Schmidt), so that the iteration converges to the nearest
//! eigenvalue not yet found. Because the Hamiltonian is symmetric, its
//! eigenvectors are mutually orthogonal and deflation keeps the iterate in
//! their orthogonal complement up to rounding.
//!
//! # Time dependence
//! The time-dependent Schrödinger equation
//! ```text
//!   ∂ψ
//! i -- = H ψ
//!   ∂t
//! ```
//! is propagated with the Cayley form of the exponential,
//! ```text
//!   -i H dt     1 - i H dt/2
//! e         ≈ ------------  + O(dt³)
//!               1 + i H dt/2
//! ```
//! which is exactly unitary for Hermitian *H*, so the norm of the state is
//! conserved to rounding for any step size. Each step applies the numerator
//! to the current state and then solves a complex tridiagonal system with the
//! denominator. An eigenstate with energy *E* acquires the phase
//! `-2 atan(E dt / 2)` per step rather than `-E dt`.
//!
//! [^1]: L. H. Thomas, "Elliptic problems in linear difference equations over a
//! network." Watson Sci. Comput. Lab. Rept., Columbia University (1949).
//!
//! [^2]: J. Crank and P. Nicolson, "A practical method for numerical evaluation
//! of solutions of partial differential equations of the heat-conduction
//! type." Mathematical Proceedings of the Cambridge Philosophical Society
//! **43** 1 50-67 (1947).
//!
//! [^3]: H. Wielandt, "Beiträge zur mathematischen Behandlung komplexer
//! Eigenwertprobleme V: Bestimmung höherer Eigenwerte durch gebrochene
//! Iteration." Bericht B 44/J/37, Aerodynamische Versuchsanstalt Göttingen
//! (1944).
